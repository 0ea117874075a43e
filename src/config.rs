use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{DeclarationFormat, TagPattern};
use crate::error::{BumpError, Result};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "gitbump.toml";

/// Represents the complete configuration for git-bump.
///
/// Contains the remote and tag naming used for publishing, and the optional
/// source file whose embedded version must agree with the new tag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default)]
    pub source: SourceConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "{version}".to_string()
}

fn default_variable() -> String {
    "version".to_string()
}

fn default_field_count() -> usize {
    4
}

/// Where the embedded version declaration lives and how to recognise it.
///
/// The cross-check is only performed when `path` is set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourceConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_variable")]
    pub variable: String,

    #[serde(default = "default_field_count")]
    pub field_count: usize,

    #[serde(default)]
    pub sentinel: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            path: None,
            variable: default_variable(),
            field_count: default_field_count(),
            sentinel: 0,
        }
    }
}

impl SourceConfig {
    pub fn declaration_format(&self) -> DeclarationFormat {
        DeclarationFormat {
            variable: self.variable.clone(),
            field_count: self.field_count,
            sentinel: self.sentinel,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            source: SourceConfig::default(),
        }
    }
}

impl Config {
    /// Compiled tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.as_str())
    }

    /// Check values serde cannot express constraints for
    pub fn validate(&self) -> Result<()> {
        self.tag_pattern()?;

        if self.remote.trim().is_empty() {
            return Err(BumpError::config("remote must not be empty"));
        }
        if self.source.variable.is_empty() {
            return Err(BumpError::config("source.variable must not be empty"));
        }
        if self.source.field_count < 4 {
            return Err(BumpError::config(format!(
                "source.field_count must be at least 4 (major, minor, patch, sentinel), got {}",
                self.source.field_count
            )));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `.gitbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded and validated configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| BumpError::config(format!("Invalid TOML: {}", e)))?;
    config.validate()?;
    Ok(config)
}
