//! Error types for pagewright-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template engine error (syntax, lookup, or runtime failure).
    #[error("template engine error: {0}")]
    Template(#[from] minijinja::Error),

    /// A namespace was registered against a directory that does not exist.
    #[error("namespace '@{name}' points at missing directory {path}")]
    MissingNamespace { name: String, path: PathBuf },

    /// The loader root itself does not exist.
    #[error("template root {path} is not a directory")]
    MissingRoot { path: PathBuf },
}
