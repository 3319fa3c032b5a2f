//! repo-dump: Dump a repository into a single framed text stream
//!
//! This tool walks a repository and writes its text files, framed with delimiters, so the
//! result can be fed to a large language model as context.

use anyhow::Result;

fn main() -> Result<()> {
    repo_dump::cli::run()
}
