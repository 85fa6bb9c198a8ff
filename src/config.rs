//! Configuration file support for release-helper.
//!
//! Provides YAML-based configuration through `release-helper.config.yml`
//! files, and merges file values with command-line overrides.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::adapters::outbound::repository::LocalRepository;
use crate::application::dto::{OutputFormat, ReportGoal};
use crate::release_report::policies::DEFAULT_SNAPSHOT_MARKER;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "release-helper.config.yml";

/// Remote repository used when neither the CLI nor the config names one
pub const DEFAULT_REMOTE_REPOSITORY: &str = "https://repo.maven.apache.org/maven2";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub goal: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub snapshot_marker: Option<String>,
    pub snapshot_modules_only: Option<bool>,
    pub local_repository: Option<String>,
    pub remote_repositories: Option<Vec<String>>,
    pub offline: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(goal) = config.goal.as_deref() {
        if let Err(e) = ReportGoal::from_str(goal) {
            bail!("Invalid config: {}", e);
        }
    }

    if let Some(format) = config.format.as_deref() {
        if let Err(e) = OutputFormat::from_str(format) {
            bail!("Invalid config: {}", e);
        }
    }

    if let Some(marker) = config.snapshot_marker.as_deref() {
        if marker.trim().is_empty() {
            bail!(
                "Invalid config: snapshot_marker must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default marker \"{}\".",
                DEFAULT_SNAPSHOT_MARKER
            );
        }
    }

    if let Some(ref urls) = config.remote_repositories {
        for (i, url) in urls.iter().enumerate() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!(
                    "Invalid config: remote_repositories[{}] must be an http(s) URL, got '{}'.\n\n\
                     💡 Hint: Use a repository base URL such as \"{}\".",
                    i,
                    url,
                    DEFAULT_REMOTE_REPOSITORY
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub goal: Option<ReportGoal>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub snapshot_marker: Option<String>,
    pub all_modules: bool,
    pub local_repository: Option<PathBuf>,
    pub remote_repositories: Vec<String>,
    pub offline: bool,
}

/// Effective settings after layering CLI over config over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub goal: ReportGoal,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub snapshot_marker: String,
    pub snapshot_modules_only: bool,
    pub local_repository: Option<PathBuf>,
    pub remote_repositories: Vec<String>,
    pub offline: bool,
}

impl Settings {
    pub fn resolve(overrides: Overrides, config: Option<&ConfigFile>) -> Result<Self> {
        let empty = ConfigFile::default();
        let config = config.unwrap_or(&empty);

        let goal = match overrides.goal {
            Some(goal) => goal,
            None => parse_optional(config.goal.as_deref())?.unwrap_or_default(),
        };
        let format = match overrides.format {
            Some(format) => format,
            None => parse_optional(config.format.as_deref())?.unwrap_or_default(),
        };

        let remote_repositories = if !overrides.remote_repositories.is_empty() {
            overrides.remote_repositories
        } else {
            config
                .remote_repositories
                .clone()
                .unwrap_or_else(|| vec![DEFAULT_REMOTE_REPOSITORY.to_string()])
        };

        Ok(Self {
            goal,
            format,
            output: overrides
                .output
                .or_else(|| config.output.as_ref().map(PathBuf::from)),
            snapshot_marker: overrides
                .snapshot_marker
                .or_else(|| config.snapshot_marker.clone())
                .unwrap_or_else(|| DEFAULT_SNAPSHOT_MARKER.to_string()),
            snapshot_modules_only: !overrides.all_modules
                && config.snapshot_modules_only.unwrap_or(true),
            local_repository: overrides
                .local_repository
                .or_else(|| config.local_repository.as_ref().map(PathBuf::from))
                .or_else(LocalRepository::default_root),
            remote_repositories,
            offline: overrides.offline || config.offline.unwrap_or(false),
        })
    }
}

fn parse_optional<T: FromStr<Err = String>>(value: Option<&str>) -> Result<Option<T>> {
    value
        .map(T::from_str)
        .transpose()
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))
}
