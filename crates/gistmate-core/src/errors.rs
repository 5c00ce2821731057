//! Core error types for gistmate.

/// Configuration-specific errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write config file.
    #[error("failed to write config file {path}: {source}")]
    WriteFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse config.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Key is not a known configuration option.
    #[error("unknown configuration key {0:?}")]
    UnknownKey(String),
}

/// Errors from the local gist cache.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CacheError {
    /// The cache file exists but is not a mapping of gist ids to filenames.
    #[error("gist cache {path} is corrupt: {message}")]
    Corrupt {
        /// Path of the cache file.
        path: String,
        /// What failed to parse.
        message: String,
    },

    /// Failed to read the cache file.
    #[error("failed to read gist cache {path}: {source}")]
    ReadFile {
        /// Path of the cache file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the cache file.
    #[error("failed to write gist cache {path}: {source}")]
    WriteFile {
        /// Path of the cache file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// An append targeted a gist id with no cache entry.
    #[error("gist {0} is not in the cache")]
    UnknownGist(String),
}

impl CacheError {
    /// Whether this error means the cache file could not be parsed.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}
