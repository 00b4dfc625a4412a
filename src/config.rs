//! Configuration management for the ATS scorer

use crate::error::{AtsScorerError, Result};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Upper bound accepted for `input.max_file_size_kb` (1 GiB)
pub const MAX_FILE_SIZE_KB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
    pub include_metadata: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub enable_cache: bool,
    pub max_file_size_kb: u64,
}

impl InputConfig {
    /// Size limit in bytes; hand-edited values past `u64::MAX / 1024` saturate
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(format: &str) -> std::result::Result<Self, Self::Err> {
        match format.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!(
                "Invalid output format: {}. Supported: console, json, markdown, html",
                format
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
                include_metadata: true,
            },
            input: InputConfig {
                enable_cache: true,
                max_file_size_kb: 10 * 1024,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AtsScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scorer")
            .join("config.toml")
    }

    /// Set a scalar value by dotted key, e.g. `output.format` or `input.max_file_size_kb`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output.format" => {
                self.output.format = value.parse().map_err(|e: String| anyhow!(e))?;
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.pretty_json" => self.output.pretty_json = parse_value(key, value)?,
            "output.include_metadata" => self.output.include_metadata = parse_value(key, value)?,
            "input.enable_cache" => self.input.enable_cache = parse_value(key, value)?,
            "input.max_file_size_kb" => {
                let size: u64 = parse_value(key, value)?;
                if size == 0 || size > MAX_FILE_SIZE_KB {
                    return Err(AtsScorerError::Configuration(format!(
                        "input.max_file_size_kb must be between 1 and {}",
                        MAX_FILE_SIZE_KB
                    )));
                }
                self.input.max_file_size_kb = size;
            }
            _ => {
                return Err(AtsScorerError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }
        Ok(())
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.input.max_file_size_bytes()
    }
}

fn parse_value<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value '{}' for {}", value, key))
}
