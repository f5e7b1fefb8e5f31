//! MiniJinja rendering environment: [`EngineOptions`] and [`TemplateEngine`].
//!
//! # Environment settings
//!
//! | Setting            | Value                                             |
//! |--------------------|---------------------------------------------------|
//! | Loader             | [`TemplateLoader`] (base dir + `@namespace` roots)|
//! | Autoescape         | off (hand-authored markup)                        |
//! | Debug              | on by default; registers `dump(...)`              |
//! | Block whitespace   | first newline after a block tag is dropped        |
//! | Trailing newline   | kept                                              |
//! | Undefined values   | chainable (`missing.attr` renders empty)          |
//! | Strict variables   | optional; any undefined value fails the template  |
//! | Booleans           | `true` prints `1`, `false` prints nothing         |

use std::error::Error;
use std::fmt::Write as _;
use std::sync::Arc;

use minijinja::value::{Rest, Value, ValueKind};
use minijinja::{
    escape_formatter, AutoEscape, Environment, ErrorKind, Output, State, UndefinedBehavior,
};

use pagewright_core::{DataMap, ResolvedConfig};

use crate::error::RenderError;
use crate::loader::TemplateLoader;
use crate::trace::{FailureOrigin, TraceFrame};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs applied once when the environment is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Attach debug info to errors and expose `dump(...)`.
    pub debug: bool,
    /// Fail on any use of an undefined variable.
    pub strict_variables: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            debug: true,
            strict_variables: false,
        }
    }
}

/// Booleans print as `1` and the empty string; everything else uses the
/// engine's own formatting.
fn format_value(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if value.kind() != ValueKind::Bool {
        return escape_formatter(out, state, value);
    }
    if value.is_true() {
        out.write_str("1").map_err(|_| {
            minijinja::Error::new(ErrorKind::WriteFailure, "could not write output")
        })?;
    }
    Ok(())
}

fn dump(values: Rest<Value>) -> String {
    values
        .iter()
        .map(|v| format!("{v:#?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// One loader and one environment, built up front and shared by every render.
#[derive(Debug)]
pub struct TemplateEngine {
    env: Environment<'static>,
    loader: Arc<TemplateLoader>,
}

impl TemplateEngine {
    /// Build the environment around `loader`.
    pub fn new(loader: TemplateLoader, options: EngineOptions) -> Self {
        let loader = Arc::new(loader);
        let mut env = Environment::new();

        let source = Arc::clone(&loader);
        env.set_loader(move |name| source.load(name));
        env.set_debug(options.debug);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_formatter(format_value);
        env.set_undefined_behavior(if options.strict_variables {
            UndefinedBehavior::Strict
        } else {
            UndefinedBehavior::Chainable
        });
        if options.debug {
            env.add_function("dump", dump);
        }

        TemplateEngine { env, loader }
    }

    /// Loader rooted at `base_dir` with every configured namespace mounted.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, RenderError> {
        let mut loader = TemplateLoader::new(&config.base_dir)?;
        for (name, dir) in &config.namespaces {
            loader.add_namespace(name.clone(), dir)?;
        }
        let options = EngineOptions {
            strict_variables: config.strict_variables,
            ..EngineOptions::default()
        };
        Ok(Self::new(loader, options))
    }

    /// Render the template `name` (loader-relative) with `data` as context.
    pub fn render(&self, name: &str, data: &DataMap) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(data)?)
    }

    pub fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    /// Name the environment reports for a loaded template, or `None` when it
    /// cannot be loaded.
    pub fn loaded_name(&self, name: &str) -> Option<String> {
        self.env
            .get_template(name)
            .ok()
            .map(|tmpl| tmpl.name().to_string())
    }
}

impl FailureOrigin for TemplateEngine {
    fn resolve_failure_origin(&self, frame: &(dyn Error + 'static)) -> Option<TraceFrame> {
        let err = frame.downcast_ref::<minijinja::Error>()?;
        let recorded = err.name()?;
        let template = self
            .loaded_name(recorded)
            .unwrap_or_else(|| recorded.to_string());
        Some(TraceFrame {
            template,
            line: err.line(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
