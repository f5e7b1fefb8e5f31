//! # pagewright-renderer
//!
//! MiniJinja-backed template engine adapter: a filesystem loader with
//! `@namespace` roots, one shared environment, and recovery of the
//! originating templates from a render failure.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pagewright_core::{Config, DataMap};
//! use pagewright_renderer::TemplateEngine;
//!
//! fn render_index(config: Config) -> Result<String, Box<dyn std::error::Error>> {
//!     let resolved = config.resolve()?;
//!     let engine = TemplateEngine::from_config(&resolved)?;
//!     Ok(engine.render(&resolved.template_name("index"), &DataMap::new())?)
//! }
//! ```

pub mod engine;
pub mod error;
pub mod loader;
pub mod trace;

pub use engine::{EngineOptions, TemplateEngine};
pub use error::RenderError;
pub use loader::TemplateLoader;
pub use trace::{engine_errors, template_trace, FailureOrigin, TraceFrame};
