//! File-based configuration implementation.
//!
//! Reads/writes config.yml in the gistmate config directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Config, config_dir, env_key, validate_key};
use crate::errors::ConfigError;

/// File-based configuration backed by a YAML file.
#[derive(Debug)]
pub struct FileConfig {
    config_path: PathBuf,
    data: ConfigData,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    browser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clipboard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cache_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    web_url: Option<String>,
}

impl ConfigData {
    fn slot(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "editor" => Some(&mut self.editor),
            "browser" => Some(&mut self.browser),
            "clipboard" => Some(&mut self.clipboard),
            "cache_file" => Some(&mut self.cache_file),
            "api_url" => Some(&mut self.api_url),
            "web_url" => Some(&mut self.web_url),
            _ => None,
        }
    }

    fn value(&self, key: &str) -> Option<&String> {
        match key {
            "editor" => self.editor.as_ref(),
            "browser" => self.browser.as_ref(),
            "clipboard" => self.clipboard.as_ref(),
            "cache_file" => self.cache_file.as_ref(),
            "api_url" => self.api_url.as_ref(),
            "web_url" => self.web_url.as_ref(),
            _ => None,
        }
    }
}

impl FileConfig {
    /// Load configuration from the default config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_dir().join("config.yml"))
    }

    /// Load configuration from a specific file. A missing file is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load_from(config_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = config_path.into();
        let data = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadFile {
                path: config_path.display().to_string(),
                source: e,
            })?;
            if content.trim().is_empty() {
                ConfigData::default()
            } else {
                serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        } else {
            ConfigData::default()
        };

        Ok(Self { config_path, data })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Config for FileConfig {
    fn get(&self, key: &str) -> Option<String> {
        if let Ok(val) = std::env::var(env_key(key)) {
            return Some(val);
        }
        self.data.value(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        validate_key(key)?;
        if let Some(slot) = self.data.slot(key) {
            *slot = Some(value.to_string());
        }
        Ok(())
    }

    fn write(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::WriteFile {
                path: dir.display().to_string(),
                source: e,
            })?;
        }

        let yaml =
            serde_yaml::to_string(&self.data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(&self.config_path, yaml).map_err(|e| ConfigError::WriteFile {
            path: self.config_path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }
}
