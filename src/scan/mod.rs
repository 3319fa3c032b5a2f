//! Repository traversal and dump serialization

use crate::domain::{DumpOptions, DumpStats};
use crate::error::{DumpError, Result};
use crate::render::{write_footer, write_frame, write_header};
use crate::rules::IgnoreResolver;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

pub mod walker;

pub use walker::DumpWalker;

/// Dump every kept text file under `root` to `out` as framed output.
///
/// Any error means the bytes already written to `out` are not a valid dump.
pub fn dump_repository<W: Write>(
    root: &Path,
    options: &DumpOptions,
    out: &mut W,
) -> Result<DumpStats> {
    ensure_directory(root)?;
    let mut resolver = IgnoreResolver::new(root, options)?;

    write_header(out, options.description.as_deref())?;

    let walker = DumpWalker::new(root, &mut resolver).skip_paths(&options.skip_paths);
    let stats = walker.walk(|entry| {
        let mut file = File::open(&entry.path)
            .map_err(|source| DumpError::FileRead { path: entry.path.clone(), source })?;
        write_frame(&mut *out, &entry.relative_path, &entry.path, &mut file)
    })?;

    write_footer(out)?;
    out.flush().map_err(|e| DumpError::write("output", e))?;

    tracing::info!(
        "Dumped {} files ({} bytes) from {}",
        stats.files_dumped,
        stats.bytes_dumped,
        root.display()
    );
    Ok(stats)
}

/// Write the relative path of every file a dump would include, one per line.
pub fn list_repository<W: Write>(
    root: &Path,
    options: &DumpOptions,
    out: &mut W,
) -> Result<DumpStats> {
    ensure_directory(root)?;
    let mut resolver = IgnoreResolver::new(root, options)?;

    let walker = DumpWalker::new(root, &mut resolver).skip_paths(&options.skip_paths);
    let stats = walker.walk(|entry| {
        writeln!(out, "{}", entry.relative_path)
            .map_err(|e| DumpError::write(format!("listing for {}", entry.relative_path), e))?;
        fs::metadata(&entry.path)
            .map(|m| m.len())
            .map_err(|source| DumpError::Metadata { path: entry.path.clone(), source })
    })?;

    out.flush().map_err(|e| DumpError::write("output", e))?;
    Ok(stats)
}

fn ensure_directory(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root)
        .map_err(|source| DumpError::Metadata { path: root.to_path_buf(), source })?;
    if !metadata.is_dir() {
        return Err(DumpError::Metadata {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "not a directory"),
        });
    }
    Ok(())
}
