//! Pagewright core library: configuration, JSON data loading, errors.
//!
//! - [`config`]: [`Config`] as read from disk and its [`ResolvedConfig`]
//! - [`data`]: data-file loading and the global-wins merge policy
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod data;
pub mod error;

pub use config::{Config, DiagnosticsConfig, ResolvedConfig};
pub use data::{global_data, load_json, merge, DataFile, DataMap};
pub use error::ConfigError;
