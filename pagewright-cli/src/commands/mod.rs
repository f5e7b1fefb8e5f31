pub mod list;
pub mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pagewright_core::Config;

/// Where to find the site configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config file (YAML, or JSON with a `.json` extension).
    #[arg(short, long, default_value = "pagewright.yaml")]
    pub config: PathBuf,

    /// Override the config's `baseDir`.
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config> {
        let mut config = Config::load(&self.config)
            .with_context(|| format!("failed to load config {}", self.config.display()))?;
        if let Some(dir) = &self.base_dir {
            config.base_dir = dir.clone();
        }
        Ok(config)
    }
}
