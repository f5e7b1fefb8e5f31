//! # pagewright-build
//!
//! Discovery, per-file render/write, and diagnostic reporting.
//!
//! Call [`run`] with a resolved configuration to render every template the
//! configured pattern matches. A failing template is reported and skipped;
//! the rest of the batch still renders.

pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod writer;

pub use diagnostics::{Diagnostic, Reporter, SourceLine};
pub use discovery::{discover, TemplateArtifact};
pub use error::BuildError;
pub use orchestrator::{BuildReport, FileFailure, SiteBuilder};
pub use pipeline::{run, run_with};
pub use writer::write_output;
