//! Pagewright: static template-to-HTML renderer.
//!
//! # Usage
//!
//! ```text
//! pagewright render [--config FILE] [--build] [--base-dir DIR] [--context-lines N] [--quiet-missing]
//! pagewright list [--config FILE] [--base-dir DIR]
//! ```
//!
//! # Exit status
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | every template rendered                        |
//! | 1    | one or more templates failed                   |
//! | 2    | configuration or engine construction failed    |

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{list::ListArgs, render::RenderArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "pagewright",
    version,
    about = "Render a directory of templates into static HTML pages",
    long_about = None,
)]
struct Cli {
    /// Log each pipeline step to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every matching template to `<dest>/<name>.html`.
    Render(RenderArgs),

    /// List the templates the configured pattern matches.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

pub(crate) const EXIT_FAILED_FILES: u8 = 1;
pub(crate) const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render(args) => args.run(),
        Commands::List(args) => args.run(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Logs go to stderr; stdout carries progress and diagnostics.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
