//! Depth-first tree walk that applies layered ignore rules.

use crate::domain::{Decision, DumpEntry, DumpStats};
use crate::error::{DumpError, Result};
use crate::rules::IgnoreResolver;
use crate::utils::paths::relative_path;
use crate::utils::classify_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walks one dump root in pre-order, siblings sorted by file name.
///
/// Directories are registered with the resolver before their children are read, so a
/// nested `.gitignore` only affects its own subtree. Symlinks are never followed.
pub struct DumpWalker<'a> {
    root: &'a Path,
    resolver: &'a mut IgnoreResolver,
    skip_paths: &'a [PathBuf],
    stats: DumpStats,
}

impl<'a> DumpWalker<'a> {
    pub fn new(root: &'a Path, resolver: &'a mut IgnoreResolver) -> Self {
        Self { root, resolver, skip_paths: &[], stats: DumpStats::default() }
    }

    /// Paths treated as ignored regardless of the rules, e.g. the dump's own output file.
    pub fn skip_paths(mut self, paths: &'a [PathBuf]) -> Self {
        self.skip_paths = paths;
        self
    }

    /// Visit the tree and call `on_file` for every kept text file.
    ///
    /// `on_file` returns the number of bytes it emitted. The first error from the walk or
    /// from `on_file` stops the traversal.
    pub fn walk<F>(mut self, mut on_file: F) -> Result<DumpStats>
    where
        F: FnMut(&DumpEntry) -> Result<u64>,
    {
        let mut iter =
            WalkDir::new(self.root).follow_links(false).sort_by_file_name().min_depth(1).into_iter();

        while let Some(next) = iter.next() {
            let dir_entry = next.map_err(|source| DumpError::Walk {
                path: source.path().unwrap_or(self.root).to_path_buf(),
                source,
            })?;

            let file_type = dir_entry.file_type();
            let mut entry = DumpEntry {
                path: dir_entry.path().to_path_buf(),
                relative_path: relative_path(self.root, dir_entry.path()),
                is_dir: file_type.is_dir(),
                decision: Decision::Kept,
            };

            let ignored = if self.skip_paths.iter().any(|skip| *skip == entry.path) {
                tracing::debug!("Skipping output file {}", entry.relative_path);
                true
            } else if entry.is_dir {
                self.resolver.matches_dir(&entry.relative_path)
            } else {
                self.resolver.matches(&entry.relative_path)
            };

            if ignored {
                if entry.is_dir {
                    iter.skip_current_dir();
                }
                tracing::trace!("Ignored {}", entry.relative_path);
                entry.decision = Decision::Ignored;
            } else if file_type.is_symlink() {
                tracing::debug!("Skipping symlink {}", entry.relative_path);
                entry.decision = Decision::Symlink;
            } else if entry.is_dir {
                if self.resolver.register(&entry.path, &entry.relative_path)? > 0 {
                    self.stats.ignore_files_registered += 1;
                }
            } else if !file_type.is_file() {
                tracing::debug!("Skipping special file {}", entry.relative_path);
                continue;
            } else if classify_file(&entry.path).is_binary() {
                tracing::debug!("Skipping binary file {}", entry.relative_path);
                entry.decision = Decision::Binary;
            } else {
                self.stats.bytes_dumped += on_file(&entry)?;
            }

            self.stats.record(&entry);
        }

        Ok(self.stats)
    }
}
