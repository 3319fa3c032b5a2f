//! Ignore rules: reading ignore files and resolving paths against them

pub mod resolver;
pub mod source;

pub use resolver::{IgnoreResolver, IgnoreRule};
pub use source::read_ignore_file;
