//! Dump and list command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::utils::parse_csv;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{DumpOptions, DumpStats};
use crate::scan::{dump_repository, list_repository};

#[derive(Args)]
pub struct DumpArgs {
    /// Repository directory to dump (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Description of the repository, placed in the header (supports \n, \t, \r, \\)
    #[arg(short, long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Path to config file (repo-dump.toml or .repo-dump.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extra ignore patterns (comma-separated, e.g. '*.lock,docs/')
    #[arg(short = 'x', long, value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Ignore .gitignore rules (.aiignore still applies)
    #[arg(long)]
    pub no_gitignore: bool,
}

impl DumpArgs {
    fn resolve(&self) -> Result<(PathBuf, DumpOptions)> {
        let root = match &self.path {
            Some(path) => path.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("Path does not exist: {}", root.display()))?;
        if !root.is_dir() {
            anyhow::bail!("Path is not a directory: {}", root.display());
        }

        let config = load_config(&root, self.config.as_deref())?;
        let overrides = CliOverrides {
            description: self.description.clone(),
            exclude: parse_csv(&self.exclude),
            no_gitignore: self.no_gitignore,
        };
        Ok((root, merge_cli_with_config(config, overrides)))
    }
}

pub fn run(args: DumpArgs) -> Result<()> {
    let (root, options) = args.resolve()?;

    let stats = match &args.output {
        Some(output) => dump_to_file(&root, options, output)?,
        None => {
            let options = skip_redirected_stdout(options);
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            dump_repository(&root, &options, &mut out)
                .with_context(|| format!("Failed to dump {}", root.display()))?
        }
    };

    log_summary(&stats);
    Ok(())
}

pub fn run_list(args: DumpArgs) -> Result<()> {
    let (root, options) = args.resolve()?;

    let stats = match &args.output {
        Some(output) => {
            let file = File::create(output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            let options = skip_output_file(options, output);
            list_repository(&root, &options, &mut BufWriter::new(file))
        }
        None => {
            let options = skip_redirected_stdout(options);
            let stdout = io::stdout();
            list_repository(&root, &options, &mut BufWriter::new(stdout.lock()))
        }
    }
    .with_context(|| format!("Failed to list {}", root.display()))?;

    log_summary(&stats);
    Ok(())
}

/// A failed dump leaves no partial output file behind.
fn dump_to_file(root: &Path, options: DumpOptions, output: &Path) -> Result<DumpStats> {
    let file =
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let options = skip_output_file(options, output);
    let mut out = BufWriter::new(file);

    match dump_repository(root, &options, &mut out) {
        Ok(stats) => {
            out.flush().with_context(|| format!("Failed to write {}", output.display()))?;
            Ok(stats)
        }
        Err(err) => {
            drop(out);
            if let Err(remove_err) = fs::remove_file(output) {
                tracing::warn!(
                    "Failed to remove partial output {}: {}",
                    output.display(),
                    remove_err
                );
            }
            Err(err).with_context(|| format!("Failed to dump {}", root.display()))
        }
    }
}

/// Keep the walk from reading the file it is writing. `output` must already exist.
fn skip_output_file(options: DumpOptions, output: &Path) -> DumpOptions {
    match output.canonicalize() {
        Ok(path) => options.skip_path(path),
        Err(err) => {
            tracing::warn!("Could not resolve output path {}: {}", output.display(), err);
            options
        }
    }
}

/// Same as [`skip_output_file`] for a shell redirect like `repo-dump dump > out.txt`.
#[cfg(target_os = "linux")]
fn skip_redirected_stdout(options: DumpOptions) -> DumpOptions {
    match fs::read_link("/proc/self/fd/1") {
        Ok(target) if target.is_file() => skip_output_file(options, &target),
        _ => options,
    }
}

#[cfg(not(target_os = "linux"))]
fn skip_redirected_stdout(options: DumpOptions) -> DumpOptions {
    options
}

fn log_summary(stats: &DumpStats) {
    tracing::debug!(
        files = stats.files_dumped,
        bytes = stats.bytes_dumped,
        ignored = stats.entries_ignored,
        binary = stats.files_skipped_binary,
        symlinks = stats.symlinks_skipped,
        ignore_files = stats.ignore_files_registered,
        "Dump finished"
    );
}
