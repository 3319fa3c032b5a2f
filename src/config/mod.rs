//! Configuration loading and merging
//!
//! Handles loading an optional config file from the dump root and merging it with CLI
//! arguments (CLI > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::{load_config, DumpConfig};
pub use merge::{merge_cli_with_config, CliOverrides};
