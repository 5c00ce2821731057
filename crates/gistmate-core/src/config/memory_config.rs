//! In-memory configuration for testing.
//!
//! Provides a [`MemoryConfig`] that implements [`Config`] without touching the
//! filesystem or the environment.

use std::collections::HashMap;

use super::{Config, validate_key};

/// In-memory configuration for testing.
///
/// # Examples
///
/// ```
/// use gistmate_core::config::{Config, MemoryConfig};
///
/// let config = MemoryConfig::new().with("web_url", "https://gist.example.com");
/// assert_eq!(config.web_url(), "https://gist.example.com");
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfig {
    values: HashMap<String, String>,
}

impl MemoryConfig {
    /// Create a new empty in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value without validation.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl Config for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn write(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
