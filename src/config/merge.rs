//! Merge CLI arguments over file configuration.

use crate::config::DumpConfig;
use crate::domain::DumpOptions;

/// Values given on the command line. `None` / empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub description: Option<String>,
    pub exclude: Vec<String>,
    pub no_gitignore: bool,
}

/// Build run options from a loaded config and CLI overrides.
///
/// The CLI description replaces the config one. CLI exclude patterns are appended after
/// the config's, and `--no-gitignore` can only turn `.gitignore` handling off.
pub fn merge_cli_with_config(config: DumpConfig, cli: CliOverrides) -> DumpOptions {
    let description = cli.description.or(config.description);

    let mut exclude = config.exclude;
    exclude.extend(cli.exclude);

    DumpOptions {
        description,
        exclude,
        respect_gitignore: config.respect_gitignore && !cli.no_gitignore,
        skip_paths: Vec::new(),
    }
}
