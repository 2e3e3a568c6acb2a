use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_MS};
use crate::headers::Bot;

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Crawler identity to emulate
    pub bot: Option<Bot>,

    /// Emit JSON instead of the text summary
    pub json: Option<bool>,

    /// Baseline file location
    pub baseline: Option<PathBuf>,

    /// Maximum number of redirects to follow
    pub max_redirects: Option<usize>,

    /// Per-request timeout in milliseconds
    pub timeout: Option<u64>,

    /// Verbose output
    pub verbose: Option<bool>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Default configuration file paths, highest priority first:
    /// the working directory, then `$XDG_CONFIG_HOME/preview-doctor` (or `~/.config`)
    pub fn default_paths() -> Vec<PathBuf> {
        let formats = [ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml];
        let mut paths = Vec::new();

        for format in &formats {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("preview-doctor.{}", ext)));
            }
        }

        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let app_dir = config_home.join("preview-doctor");
            for format in &formats {
                for ext in format.extensions() {
                    paths.push(app_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        Self::default_paths()
            .into_iter()
            .find(|path| path.exists())
            .map(|path| Self::from_file(&path))
            .transpose()
    }

    /// `--config` when given, otherwise the first default path that exists
    pub fn locate(cli: &Cli) -> Option<PathBuf> {
        match &cli.config {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_paths().into_iter().find(|path| path.exists()),
        }
    }

    /// Loads `--config` when given, otherwise the first default path that exists
    pub fn resolve(cli: &Cli) -> Result<Option<Self>> {
        Self::locate(cli)
            .map(|path| Self::from_file(&path))
            .transpose()
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            url: cli.url.clone(),
            bot: if cli.bot != Bot::default() {
                cli.bot
            } else {
                self.bot.unwrap_or(cli.bot)
            },
            json: cli.json || self.json.unwrap_or(false),
            baseline: cli.baseline.clone().or_else(|| self.baseline.clone()),
            update_baseline: cli.update_baseline,
            max_redirects: if cli.max_redirects != DEFAULT_MAX_REDIRECTS {
                cli.max_redirects
            } else {
                self.max_redirects.unwrap_or(cli.max_redirects)
            },
            timeout: if cli.timeout != DEFAULT_TIMEOUT_MS {
                cli.timeout
            } else {
                self.timeout.unwrap_or(cli.timeout)
            },
            verbose: cli.verbose || self.verbose.unwrap_or(false),
            config: cli.config.clone(),
        }
    }
}
