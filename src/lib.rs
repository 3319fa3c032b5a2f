//! repo-dump: Dump a repository into a single framed text stream
//!
//! The dump walks a directory tree, honors `.aiignore` and (possibly nested) `.gitignore`
//! files, skips binary content, and writes every surviving file as a delimited frame so the
//! whole repository can be pasted into an LLM prompt.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod rules;
pub mod scan;
pub mod utils;

pub use domain::{DumpOptions, DumpStats};
pub use error::{DumpError, Result};
pub use scan::{dump_repository, list_repository};
