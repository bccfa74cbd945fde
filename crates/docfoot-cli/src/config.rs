//! Configuration files (`.docfoot.toml`)
//!
//! Configuration files can be placed in:
//! - User home directory: `~/.docfoot.toml` (user defaults)
//! - Project directory: `./.docfoot.toml` (project defaults)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments
//! 2. Project config
//! 3. User config
//! 4. Built-in defaults

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".docfoot.toml";

/// How extraction results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain text report (default)
    #[default]
    Text,
    /// JSON array of `{"filename", "metadata"}` records
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings for the extract command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Number of worker threads (0 = one per CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    /// Report progress for every file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Output format (text or json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,

    /// Write the results to this file instead of stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl ExtractConfig {
    /// Overlay `other` on top of `self`, field by field
    fn overlay(self, other: Self) -> Self {
        Self {
            workers: other.workers.or(self.workers),
            verbose: other.verbose.or(self.verbose),
            format: other.format.or(self.format),
            output: other.output.or(self.output),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Path of the user config, if a home directory is known
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    pub fn project_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Find and load configuration files.
    /// Returns (`user_config`, `project_config`)
    pub fn discover_configs() -> (Option<Self>, Option<Self>) {
        let user_config =
            Self::user_config_path().and_then(|path| Self::load_optional(&path, "user"));
        let project_config = Self::load_optional(&Self::project_config_path(), "project");
        (user_config, project_config)
    }

    /// Load a config file if it exists; a broken file is reported and ignored
    fn load_optional(path: &Path, kind: &str) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "{} Failed to load {kind} config from {}: {e:#}",
                    "Warning:".yellow().bold(),
                    path.display()
                );
                None
            }
        }
    }

    /// Merge configs with precedence project > user > defaults
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let extract = [user_config, project_config]
            .into_iter()
            .flatten()
            .filter_map(|config| config.extract)
            .reduce(ExtractConfig::overlay);

        Self { extract }
    }

    /// Effective extract settings (empty when no file sets any)
    pub fn extract_settings(&self) -> ExtractConfig {
        self.extract.clone().unwrap_or_default()
    }
}
