//! Configuration management
//!
//! Handles loading and saving the `config.toml` file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    NoConfigDir,
}

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Line session settings
    pub session: SessionConfig,
    /// Result rendering settings
    pub output: OutputConfig,
}

/// Line session settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Prompt written before each line when reading from a terminal
    pub prompt: String,
    /// Lines that end the session
    pub exit_words: Vec<String>,
    /// Write the prompt at all
    pub echo_prompt: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            exit_words: vec!["exit".into(), "quit".into()],
            echo_prompt: true,
        }
    }
}

impl SessionConfig {
    /// Check whether a line (ignoring surrounding whitespace) ends the session
    pub fn is_exit_word(&self, line: &str) -> bool {
        let line = line.trim();
        self.exit_words.iter().any(|word| word == line)
    }
}

/// How parse results are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `Arg:`/`Param:` line per token
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Result rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Show the offending text with a caret under parse errors
    pub show_context: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_context: true,
        }
    }
}

/// Get the configuration directory
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "termline", "termline").map(|p| p.config_dir().to_path_buf())
}

/// Get the config file path
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load configuration from the default location
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    load_config_from(&path)
}

/// Load configuration from an explicit file
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save configuration to the default location
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_config_to(config, &path)
}

/// Save configuration to an explicit file, creating its directory
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
