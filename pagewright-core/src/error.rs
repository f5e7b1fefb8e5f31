//! Error types for pagewright-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML/JSON parse error on load. Includes missing required keys and
    /// line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON parse error on load of a `.json` config file.
    #[error("failed to parse config at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Parse error for an in-memory document (no file path available).
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A key was present but its value cannot be used.
    #[error("invalid config value for `{key}`: {reason}")]
    Validation { key: &'static str, reason: String },
}
