//! Ignore-file reading

use crate::error::{DumpError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read ignore patterns from `path`, prefixing each with `scope` when it is non-empty.
///
/// A missing file yields no patterns, and so does a symlink: ignore files are never read
/// through a link. Blank lines and `#` comments are skipped, and patterns keep file order.
pub fn read_ignore_file(path: &Path, scope: &str) -> Result<Vec<String>> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            tracing::debug!("Not following symlinked ignore file {}", path.display());
            return Ok(Vec::new());
        }
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(DumpError::IgnoreFileRead { path: path.to_path_buf(), source });
        }
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(DumpError::IgnoreFileRead { path: path.to_path_buf(), source });
        }
    };

    let content = String::from_utf8_lossy(&bytes);
    Ok(parse_ignore_lines(&content, scope))
}

pub(crate) fn parse_ignore_lines(content: &str, scope: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| scope_pattern(scope, line))
        .collect()
}

/// Join a scope and a pattern into one pattern relative to the dump root.
///
/// Directory patterns are compared literally, so their scope is kept as is. For glob
/// patterns the scope is escaped, since directory names like `[id]` or `{a,b}` are glob
/// syntax.
pub(crate) fn scope_pattern(scope: &str, line: &str) -> String {
    // Patterns are anchored at their scope already, so a leading slash adds nothing.
    let line = line.trim_start_matches('/');
    let scope = scope.trim_end_matches('/');
    if scope.is_empty() {
        line.to_string()
    } else if line.ends_with('/') {
        format!("{}/{}", scope, line)
    } else {
        format!("{}/{}", globset::escape(scope), line)
    }
}
