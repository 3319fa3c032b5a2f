//! Config file loading

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from `repo-dump.toml` / `.repo-dump.yml` and friends.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DumpConfig {
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_patterns")]
    pub exclude: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self { description: None, exclude: Vec::new(), respect_gitignore: true }
    }
}

/// Accept either a list of patterns or one comma-separated string.
fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Patterns {
        List(Vec<String>),
        Csv(String),
    }

    let raw = match Patterns::deserialize(deserializer)? {
        Patterns::List(list) => list,
        Patterns::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };
    Ok(raw.into_iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
}

pub fn load_config(repo_root: &Path, config_path: Option<&Path>) -> Result<DumpConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(repo_root),
    };

    let Some(config_file) = discovered else {
        return Ok(DumpConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(DumpConfig::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[repo-dump]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<DumpConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("repo-dump") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `repo-dump` section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<DumpConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("repo-dump") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    // An empty YAML document parses as null
    if config_val.is_null() {
        return Ok(DumpConfig::default());
    }

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(repo_root: &Path) -> Option<PathBuf> {
    let candidates = [
        "repo-dump.toml",
        ".repo-dump.toml",
        "repo-dump.yml",
        ".repo-dump.yml",
        "repo-dump.yaml",
        ".repo-dump.yaml",
    ];

    candidates.iter().map(|candidate| repo_root.join(candidate)).find(|path| path.is_file())
}
