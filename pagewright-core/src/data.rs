//! JSON data documents and the merge policy used to build a render context.
//!
//! Loading never fails: every problem degrades to an empty mapping and a
//! [`DataFile`] status the reporter turns into a notice.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// A key → value mapping exposed to templates as variables.
pub type DataMap = serde_json::Map<String, Value>;

/// Key injected into the global document from the build flag.
pub const IS_BUILD_KEY: &str = "isBuild";

/// Outcome of loading one JSON data file.
#[derive(Debug, Clone, PartialEq)]
pub enum DataFile {
    /// The file held a JSON object (possibly empty).
    Loaded(DataMap),
    /// No file at the path.
    Missing { path: PathBuf },
    /// The file exists but is unreadable, malformed, or not a JSON object.
    Invalid { path: PathBuf, reason: String },
}

impl DataFile {
    /// The loaded mapping, or an empty one for `Missing` / `Invalid`.
    pub fn into_map(self) -> DataMap {
        match self {
            DataFile::Loaded(map) => map,
            DataFile::Missing { .. } | DataFile::Invalid { .. } => DataMap::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DataFile::Loaded(_))
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFile::Loaded(map) => write!(f, "loaded {} keys", map.len()),
            DataFile::Missing { path } => write!(f, "No JSON file: {}", path.display()),
            DataFile::Invalid { path, .. } => write!(f, "Invalid JSON: {}", path.display()),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read a JSON object from `path`.
///
/// Well-formed documents that are not objects (`false`, `0`, `null`,
/// strings, arrays) are reported as invalid, the same as malformed text.
pub fn load_json(path: &Path) -> DataFile {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no data file at {}", path.display());
            return DataFile::Missing {
                path: path.to_path_buf(),
            };
        }
        Err(e) => {
            return DataFile::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(map)) => {
            tracing::debug!("loaded {} keys from {}", map.len(), path.display());
            DataFile::Loaded(map)
        }
        Ok(other) => DataFile::Invalid {
            path: path.to_path_buf(),
            reason: format!("expected a JSON object, found {}", kind_of(&other)),
        },
        Err(e) => DataFile::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}

/// Merge `global` into `per_file`. Global values win on key collision.
pub fn merge(mut per_file: DataMap, global: &DataMap) -> DataMap {
    for (key, value) in global {
        per_file.insert(key.clone(), value.clone());
    }
    per_file
}

/// Load the global document and inject [`IS_BUILD_KEY`].
///
/// Returns the mapping together with the load status so the caller can
/// report a missing or invalid global file.
pub fn global_data(path: &Path, is_build: bool) -> (DataMap, DataFile) {
    let file = load_json(path);
    let mut map = match &file {
        DataFile::Loaded(map) => map.clone(),
        _ => DataMap::new(),
    };
    map.insert(IS_BUILD_KEY.to_string(), Value::Bool(is_build));
    (map, file)
}
