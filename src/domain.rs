//! Core types shared by the scanner, the ignore resolver, and the renderer.

use std::path::PathBuf;

/// Name of the AI-specific ignore file read from the dump root.
pub const AI_IGNORE_FILE: &str = ".aiignore";

/// Name of the version-control ignore file read from the root and every visited directory.
pub const VCS_IGNORE_FILE: &str = ".gitignore";

/// Rule that is always present so VCS metadata never lands in a dump.
pub const VCS_METADATA_RULE: &str = ".git/";

/// Per-run inputs for a dump.
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// Free-text description appended to the header; backslash escapes are expanded.
    pub description: Option<String>,
    /// Extra unscoped ignore patterns, applied tree-wide.
    pub exclude: Vec<String>,
    /// Whether `.gitignore` files (root and nested) are honored.
    pub respect_gitignore: bool,
    /// Absolute paths never read during the walk, such as the file the dump is being
    /// written to.
    pub skip_paths: Vec<PathBuf>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            description: None,
            exclude: Vec::new(),
            respect_gitignore: true,
            skip_paths: Vec::new(),
        }
    }
}

impl DumpOptions {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn skip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_paths.push(path.into());
        self
    }
}

/// What the walker decided for one visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Kept,
    Ignored,
    Symlink,
    Binary,
}

/// One visited filesystem node. Built and dropped per entry.
#[derive(Debug, Clone)]
pub struct DumpEntry {
    pub path: PathBuf,
    pub relative_path: String,
    pub is_dir: bool,
    pub decision: Decision,
}

/// Counters for a single dump run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpStats {
    pub files_dumped: usize,
    pub bytes_dumped: u64,
    pub entries_ignored: usize,
    pub files_skipped_binary: usize,
    pub symlinks_skipped: usize,
    pub ignore_files_registered: usize,
}

impl DumpStats {
    pub(crate) fn record(&mut self, entry: &DumpEntry) {
        match entry.decision {
            Decision::Kept => {
                if !entry.is_dir {
                    self.files_dumped += 1;
                }
            }
            Decision::Ignored => self.entries_ignored += 1,
            Decision::Symlink => self.symlinks_skipped += 1,
            Decision::Binary => self.files_skipped_binary += 1,
        }
    }
}
