//! Utility functions

pub mod escape;
pub mod paths;
pub mod sniff;

pub use escape::unescape;
pub use paths::normalize_path;
pub use sniff::{classify_file, sniff_content_type, Classification, SNIFF_LEN};
