//! Render orchestration: one render/write cycle per discovered template.
//!
//! ## Per-file cycle
//!
//! 1. Print `Rendering <base_name>`.
//! 2. Load `<data>/<base_name>.json` (missing or invalid → empty).
//! 3. Merge the global document over it (global keys win).
//! 4. Render `<source>/<base_name>.<ext>`.
//! 5. Write `<dest>/<base_name>.html`.
//!
//! A failure in steps 4–5 is reported for that file only; the batch
//! continues with the next template.

use std::io::Write;
use std::path::PathBuf;

use pagewright_core::{global_data, load_json, merge, DataFile, DataMap, ResolvedConfig};
use pagewright_renderer::TemplateEngine;

use crate::diagnostics::{Diagnostic, Reporter};
use crate::discovery::{discover, TemplateArtifact};
use crate::error::BuildError;
use crate::writer::write_output;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A template that could not be rendered or written.
#[derive(Debug)]
pub struct FileFailure {
    pub base_name: String,
    /// Loader-relative template name that was requested.
    pub template: String,
    pub error: BuildError,
}

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output files written, in discovery order.
    pub rendered: Vec<PathBuf>,
    /// Base names of templates that failed, in discovery order.
    pub failed: Vec<String>,
}

impl BuildReport {
    pub fn attempted(&self) -> usize {
        self.rendered.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SiteBuilder
// ---------------------------------------------------------------------------

/// Drives discovery, data merging, rendering, and writing for a site.
///
/// The global document is loaded once here and reused for every render.
#[derive(Debug)]
pub struct SiteBuilder {
    config: ResolvedConfig,
    engine: TemplateEngine,
    global: DataMap,
    global_status: DataFile,
}

impl SiteBuilder {
    pub fn new(config: ResolvedConfig, engine: TemplateEngine) -> Self {
        let (global, global_status) = global_data(&config.global_path, config.is_build);
        SiteBuilder {
            config,
            engine,
            global,
            global_status,
        }
    }

    /// Merged data bag for `base_name`. A missing or invalid data file is
    /// reported and contributes nothing.
    pub fn data_for<W: Write>(&self, base_name: &str, reporter: &mut Reporter<W>) -> DataMap {
        let file = load_json(&self.config.data_file(base_name));
        reporter.data_notice(&file);
        merge(file.into_map(), &self.global)
    }

    /// Render every discovered template. Only discovery problems are
    /// returned as errors; per-file failures land in the report.
    pub fn render_all<W: Write>(
        &self,
        reporter: &mut Reporter<W>,
    ) -> Result<BuildReport, BuildError> {
        reporter.data_notice(&self.global_status);

        let artifacts = discover(&self.config)?;
        let mut report = BuildReport::default();
        for artifact in &artifacts {
            match self.render_file(artifact, reporter) {
                Ok(output) => report.rendered.push(output),
                Err(failure) => {
                    let diagnostic = Diagnostic::from_failure(
                        &failure.error,
                        &self.engine,
                        &failure.template,
                        reporter.config().context_lines,
                    );
                    reporter.diagnostic(&diagnostic);
                    report.failed.push(failure.base_name);
                }
            }
        }
        Ok(report)
    }

    /// Render and write one template. Returns the output path.
    pub fn render_file<W: Write>(
        &self,
        artifact: &TemplateArtifact,
        reporter: &mut Reporter<W>,
    ) -> Result<PathBuf, FileFailure> {
        let base_name = artifact.base_name.as_str();
        reporter.rendering(base_name);

        let data = self.data_for(base_name, reporter);

        let template = self.config.template_name(base_name);
        let output = self.config.output_file(base_name);
        tracing::debug!("rendering {} -> {}", template, output.display());

        let result = self
            .engine
            .render(&template, &data)
            .map_err(BuildError::from)
            .and_then(|html| write_output(&output, &html));

        match result {
            Ok(()) => Ok(output),
            Err(error) => {
                tracing::warn!("failed to render {}: {}", template, error);
                Err(FileFailure {
                    base_name: base_name.to_string(),
                    template,
                    error,
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
