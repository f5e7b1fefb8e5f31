//! `pagewright list`: show what `render` would pick up.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use pagewright_build::discover;

use super::ConfigArgs;

/// Arguments for `pagewright list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: ConfigArgs,
}

impl ListArgs {
    pub fn run(self) -> Result<ExitCode> {
        let config = self
            .source
            .load()?
            .resolve()
            .context("invalid configuration")?;
        let artifacts = discover(&config).context("template discovery failed")?;
        tracing::debug!("{} templates match {}", artifacts.len(), config.pattern);

        if artifacts.is_empty() {
            println!("No templates match {}", config.pattern);
            return Ok(ExitCode::SUCCESS);
        }
        let width = artifacts
            .iter()
            .map(|a| a.base_name.len())
            .max()
            .unwrap_or(0);
        for artifact in &artifacts {
            println!(
                "{:<width$}  {}",
                artifact.base_name,
                artifact.path.display(),
                width = width
            );
        }
        Ok(ExitCode::SUCCESS)
    }
}
