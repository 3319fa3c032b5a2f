//! Error types for a dump run.
//!
//! Every I/O failure is fatal for the run and carries the path that caused it. Missing
//! ignore or config files never reach this type.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = DumpError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DumpError {
    #[error("failed to read ignore file {path}: {source}")]
    IgnoreFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to stat {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {what}: {source}")]
    Write {
        what: String,
        #[source]
        source: std::io::Error,
    },
}

impl DumpError {
    pub(crate) fn write(what: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write { what: what.into(), source }
    }
}
