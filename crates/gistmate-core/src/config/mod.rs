//! Configuration system for gistmate.
//!
//! Settings live in `config.yml` inside the config directory. Every key can
//! be overridden with a `GISTMATE_<KEY>` environment variable.

mod file_config;
mod memory_config;

use std::path::PathBuf;

pub use file_config::FileConfig;
pub use memory_config::MemoryConfig;

use crate::errors::ConfigError;

/// Default REST API base URL (with trailing slash).
pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// Default base for gist web pages.
pub const DEFAULT_WEB_URL: &str = "https://gist.github.com";

/// Configuration directory path (usually ~/.config/gistmate).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GISTMATE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("gistmate")
        },
        |d| d.join("gistmate"),
    )
}

/// Environment variable overriding a config key.
pub fn env_key(key: &str) -> String {
    format!("GISTMATE_{}", key.to_uppercase())
}

/// Configuration trait for accessing settings.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Get a config value.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a config value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a known option.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Write config to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be saved.
    fn write(&self) -> anyhow::Result<()>;

    /// Get a config value with its default.
    fn get_or_default(&self, key: &str) -> String {
        self.get(key)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default_for_key(key).to_string())
    }

    /// Get the editor preference.
    fn editor(&self) -> Option<String> {
        self.get("editor").filter(|v| !v.is_empty())
    }

    /// Get the browser launcher preference.
    fn browser(&self) -> Option<String> {
        self.get("browser").filter(|v| !v.is_empty())
    }

    /// Get the clipboard command preference.
    fn clipboard(&self) -> Option<String> {
        self.get("clipboard").filter(|v| !v.is_empty())
    }

    /// Location of the gist cache file.
    fn cache_file(&self) -> PathBuf {
        self.get("cache_file")
            .filter(|v| !v.is_empty())
            .map_or_else(crate::cache::default_cache_path, |v| expand_home(&v))
    }

    /// REST API base URL, always ending in `/`.
    fn api_url(&self) -> String {
        let url = self.get_or_default("api_url");
        if url.ends_with('/') {
            url
        } else {
            format!("{url}/")
        }
    }

    /// Base URL for gist web pages, without a trailing `/`.
    fn web_url(&self) -> String {
        self.get_or_default("web_url")
            .trim_end_matches('/')
            .to_string()
    }
}

/// Known configuration keys with descriptions.
pub static CONFIG_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "editor",
        description: "the text editor program used to open fetched gist files",
        default_value: "",
    },
    ConfigOption {
        key: "browser",
        description: "the web browser to use for opening gist URLs",
        default_value: "",
    },
    ConfigOption {
        key: "clipboard",
        description: "the command that receives gist URLs on stdin to copy them",
        default_value: "",
    },
    ConfigOption {
        key: "cache_file",
        description: "the file mapping gist ids to local filenames",
        default_value: "~/.gists",
    },
    ConfigOption {
        key: "api_url",
        description: "the GitHub REST API base URL",
        default_value: DEFAULT_API_URL,
    },
    ConfigOption {
        key: "web_url",
        description: "the base URL of gist web pages",
        default_value: DEFAULT_WEB_URL,
    },
];

/// A known configuration option.
#[derive(Debug)]
pub struct ConfigOption {
    /// Config key name.
    pub key: &'static str,
    /// Description of what this option does.
    pub description: &'static str,
    /// Default value shown to users.
    pub default_value: &'static str,
}

/// Check that a key is a known option.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    if CONFIG_OPTIONS.iter().any(|o| o.key == key) {
        Ok(())
    } else {
        Err(ConfigError::UnknownKey(key.to_string()))
    }
}

/// Default configuration values.
pub fn default_for_key(key: &str) -> &str {
    match key {
        "api_url" => DEFAULT_API_URL,
        "web_url" => DEFAULT_WEB_URL,
        _ => "",
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
