//! `pagewright render`: render every matching template to HTML.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use pagewright_build::pipeline;

use super::ConfigArgs;
use crate::{EXIT_FAILED_FILES, EXIT_FATAL};

/// Arguments for `pagewright render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: ConfigArgs,

    /// Expose `isBuild = true` to every template.
    #[arg(long)]
    pub build: bool,

    /// Source lines shown either side of a failing line.
    #[arg(long, value_name = "N")]
    pub context_lines: Option<usize>,

    /// Do not print a notice when a template has no data file.
    #[arg(long)]
    pub quiet_missing: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<ExitCode> {
        let mut config = self.source.load()?;
        if self.build {
            config.is_build = true;
        }
        if let Some(n) = self.context_lines {
            config.diagnostics.context_lines = n;
        }
        if self.quiet_missing {
            config.diagnostics.report_missing_data = false;
        }
        tracing::debug!(
            "render overrides: build={} context_lines={:?} quiet_missing={}",
            self.build,
            self.context_lines,
            self.quiet_missing
        );
        let config = config.resolve().context("invalid configuration")?;
        tracing::debug!("base dir {}", config.base_dir.display());

        let stdout = io::stdout();
        match pipeline::run(config, stdout.lock()) {
            Ok(report) if report.is_success() => Ok(ExitCode::SUCCESS),
            Ok(_) => Ok(ExitCode::from(EXIT_FAILED_FILES)),
            // Already printed with its cause chain by the reporter.
            Err(_) => Ok(ExitCode::from(EXIT_FATAL)),
        }
    }
}
