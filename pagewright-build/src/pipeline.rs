//! Shared build entrypoint used by the CLI.

use std::io::Write;

use pagewright_core::ResolvedConfig;
use pagewright_renderer::TemplateEngine;

use crate::diagnostics::Reporter;
use crate::error::BuildError;
use crate::orchestrator::{BuildReport, SiteBuilder};

/// Build the engine, render every template, and print a summary to `out`.
///
/// Errors returned here are run-level (engine construction, invalid
/// pattern); they have already been printed to `out` and nothing was
/// rendered after them. Per-file failures are in the returned report.
pub fn run<W: Write>(config: ResolvedConfig, out: W) -> Result<BuildReport, BuildError> {
    let mut reporter = Reporter::new(out, config.diagnostics);
    run_with(config, &mut reporter)
}

/// [`run`] with a caller-owned reporter.
pub fn run_with<W: Write>(
    config: ResolvedConfig,
    reporter: &mut Reporter<W>,
) -> Result<BuildReport, BuildError> {
    let result = TemplateEngine::from_config(&config)
        .map_err(BuildError::from)
        .and_then(|engine| SiteBuilder::new(config, engine).render_all(reporter));

    match result {
        Ok(report) => {
            reporter.summary(&report);
            Ok(report)
        }
        Err(err) => {
            tracing::error!("build aborted: {}", err);
            reporter.fatal(&err);
            Err(err)
        }
    }
}
