//! Site configuration and its resolved, absolute form.
//!
//! A [`Config`] mirrors the config file one-to-one (camelCase keys, paths
//! relative to `baseDir`). [`Config::resolve`] turns it into a
//! [`ResolvedConfig`] holding every absolute path the pipeline needs; the
//! resolved form is immutable and built exactly once per run.
//!
//! ```yaml
//! baseDir: .
//! source: templates
//! pattern: templates/*.twig
//! dest: build
//! data: data
//! global: data/global.json
//! isBuild: false
//! strictVariables: false
//! namespaces:
//!   components: components
//! ```

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default template file extension (without the dot).
pub const DEFAULT_EXTENSION: &str = "twig";

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

// ---------------------------------------------------------------------------
// Config (as written on disk)
// ---------------------------------------------------------------------------

/// Site configuration exactly as read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root for all relative resolution.
    pub base_dir: PathBuf,
    /// Template source directory, relative to `base_dir`.
    pub source: PathBuf,
    /// Glob pattern for template discovery, relative to `base_dir`.
    pub pattern: String,
    /// Build output directory, relative to `base_dir`.
    pub dest: PathBuf,
    /// Per-template JSON data directory, relative to `base_dir`.
    pub data: PathBuf,
    /// Namespace name → directory, relative to `base_dir`.
    #[serde(default)]
    pub namespaces: BTreeMap<String, PathBuf>,
    /// Global JSON data file, relative to `base_dir`.
    pub global: PathBuf,
    /// Injected into the global data as `isBuild`.
    #[serde(default)]
    pub is_build: bool,
    /// Template file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Fail a template on any use of an undefined variable.
    #[serde(default)]
    pub strict_variables: bool,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Controls what the diagnostic reporter prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagnosticsConfig {
    /// Print `No JSON file: <path>` when a data file is absent.
    pub report_missing_data: bool,
    /// Source lines shown on each side of the failing line.
    pub context_lines: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            report_missing_data: true,
            context_lines: 0,
        }
    }
}

impl Config {
    /// Load a config file. `.json` files are parsed as JSON, anything else
    /// as YAML. A relative `baseDir` is taken relative to the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let mut config: Config = if is_json {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        if config.base_dir.is_relative() {
            if let Some(dir) = path.parent() {
                config.base_dir = dir.join(&config.base_dir);
            }
        }
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse an in-memory YAML (or JSON) document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Compute the absolute paths for this configuration.
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        if self.pattern.trim().is_empty() {
            return Err(ConfigError::Validation {
                key: "pattern",
                reason: "must not be empty".to_string(),
            });
        }
        let extension = self.extension.trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(ConfigError::Validation {
                key: "extension",
                reason: "must not be empty".to_string(),
            });
        }

        let base = self.base_dir;
        let mut namespaces = BTreeMap::new();
        for (name, dir) in self.namespaces {
            let name = name.trim_start_matches('@').to_string();
            if name.is_empty() || name.contains('/') {
                return Err(ConfigError::Validation {
                    key: "namespaces",
                    reason: format!("'{name}' is not a usable namespace name"),
                });
            }
            namespaces.insert(name, base.join(dir));
        }

        Ok(ResolvedConfig {
            source_dir: logical_dir(&self.source),
            source_path: base.join(&self.source),
            build_path: base.join(&self.dest),
            data_path: base.join(&self.data),
            global_path: base.join(&self.global),
            pattern: base.join(&self.pattern).to_string_lossy().into_owned(),
            namespaces,
            extension,
            is_build: self.is_build,
            strict_variables: self.strict_variables,
            diagnostics: self.diagnostics,
            base_dir: base,
        })
    }
}

/// `source` as a forward-slash template-name prefix (`.` segments dropped).
fn logical_dir(dir: &Path) -> String {
    dir.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// ResolvedConfig
// ---------------------------------------------------------------------------

/// Absolute form of a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_dir: PathBuf,
    /// Logical source directory used to build template names.
    pub source_dir: String,
    pub source_path: PathBuf,
    pub build_path: PathBuf,
    pub data_path: PathBuf,
    pub global_path: PathBuf,
    /// Discovery glob, already rooted at `base_dir`.
    pub pattern: String,
    /// Namespace name (without `@`) → absolute directory.
    pub namespaces: BTreeMap<String, PathBuf>,
    pub extension: String,
    pub is_build: bool,
    pub strict_variables: bool,
    pub diagnostics: DiagnosticsConfig,
}

impl ResolvedConfig {
    /// Loader-relative template name: `<source>/<base_name>.<ext>`.
    pub fn template_name(&self, base_name: &str) -> String {
        if self.source_dir.is_empty() {
            format!("{base_name}.{}", self.extension)
        } else {
            format!("{}/{base_name}.{}", self.source_dir, self.extension)
        }
    }

    /// `<data>/<base_name>.json`
    pub fn data_file(&self, base_name: &str) -> PathBuf {
        self.data_path.join(format!("{base_name}.json"))
    }

    /// `<dest>/<base_name>.html`
    pub fn output_file(&self, base_name: &str) -> PathBuf {
        self.build_path.join(format!("{base_name}.html"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
