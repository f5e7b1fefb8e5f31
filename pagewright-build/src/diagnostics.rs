//! Diagnostic reporting: turns per-file failures into readable text.
//!
//! Two shapes are reported differently:
//!
//! - [`Diagnostic::Template`]: the engine pinned the failure to a template and
//!   line (syntax errors, unresolvable includes). Printed as the raw message,
//!   `<template> line: <n>`, and the offending source line(s).
//! - [`Diagnostic::Runtime`]: anything else (errors raised while executing a
//!   template, write failures). Printed as the message followed by a
//!   template-only trace recovered through
//!   [`FailureOrigin`](pagewright_renderer::FailureOrigin). An empty trace
//!   is printed as `Trace: (no template frames)`.
//!
//! All output goes through [`Reporter`]; nothing here returns an error.

use std::error::Error;
use std::fmt;
use std::io::Write;

use minijinja::ErrorKind;

use pagewright_core::{DataFile, DiagnosticsConfig};
use pagewright_renderer::{engine_errors, template_trace, TemplateEngine, TraceFrame};

use crate::error::BuildError;
use crate::orchestrator::BuildReport;

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// One numbered line of template source shown under a template diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
    pub failing: bool,
}

/// Printable description of a single file's failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Template {
        message: String,
        template: String,
        line: Option<usize>,
        context: Vec<SourceLine>,
    },
    Runtime {
        message: String,
        trace: Vec<TraceFrame>,
    },
}

impl Diagnostic {
    /// Classify `err`, raised while producing `requested`.
    pub fn from_failure(
        err: &BuildError,
        engine: &TemplateEngine,
        requested: &str,
        context_lines: usize,
    ) -> Self {
        let chain = engine_errors(err);

        let located = chain
            .iter()
            .find(|e| matches!(e.kind(), ErrorKind::SyntaxError | ErrorKind::TemplateNotFound));
        if let Some(engine_err) = located {
            let template = engine_err.name().unwrap_or(requested).to_string();
            let line = engine_err.line();
            let context = line
                .and_then(|n| {
                    engine
                        .loader()
                        .source(&template)
                        .map(|src| source_context(&src, n, context_lines))
                })
                .unwrap_or_default();
            return Diagnostic::Template {
                message: raw_message(engine_err),
                template,
                line,
                context,
            };
        }

        let message = match chain.last() {
            Some(root_cause) => root_cause.to_string(),
            None => err.to_string(),
        };
        Diagnostic::Runtime {
            message,
            trace: template_trace(err, engine),
        }
    }
}

/// Engine message without the location suffix the engine's `Display` adds.
fn raw_message(err: &minijinja::Error) -> String {
    match err.detail() {
        Some(detail) => format!("{}: {}", err.kind(), detail),
        None => err.kind().to_string(),
    }
}

/// `line` (1-based) plus up to `radius` lines either side.
fn source_context(source: &str, line: usize, radius: usize) -> Vec<SourceLine> {
    let first = line.saturating_sub(radius).max(1);
    let last = line.saturating_add(radius);
    source
        .lines()
        .enumerate()
        .map(|(idx, text)| (idx + 1, text))
        .filter(|(number, _)| (first..=last).contains(number))
        .map(|(number, text)| SourceLine {
            number,
            text: text.to_string(),
            failing: number == line,
        })
        .collect()
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Template {
                message,
                template,
                line,
                context,
            } => {
                writeln!(f, "{message}")?;
                match line {
                    Some(n) => write!(f, "{template} line: {n}")?,
                    None => write!(f, "{template}")?,
                }
                for src in context {
                    let marker = if src.failing { '>' } else { ' ' };
                    write!(f, "\n{marker}{:>4} | {}", src.number, src.text)?;
                }
                Ok(())
            }
            Diagnostic::Runtime { message, trace } => {
                write!(f, "{message}")?;
                if trace.is_empty() {
                    return write!(f, "\nTrace: (no template frames)");
                }
                write!(f, "\nTrace:")?;
                for frame in trace {
                    write!(f, "\n  {frame}")?;
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// Line-oriented process output: progress, data notices, diagnostics.
///
/// Write errors on the sink are ignored.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    config: DiagnosticsConfig,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, config: DiagnosticsConfig) -> Self {
        Reporter { out, config }
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{args}");
    }

    /// `Rendering <base_name>`
    pub fn rendering(&mut self, base_name: &str) {
        self.line(format_args!("Rendering {base_name}"));
    }

    /// Notice for a missing or invalid data file. Missing files are only
    /// reported when `report_missing_data` is set.
    pub fn data_notice(&mut self, file: &DataFile) {
        match file {
            DataFile::Loaded(_) => {}
            DataFile::Missing { .. } if !self.config.report_missing_data => {}
            DataFile::Missing { .. } => self.line(format_args!("{file}")),
            DataFile::Invalid { reason, .. } => {
                tracing::debug!("invalid data file: {}", reason);
                self.line(format_args!("{file}"));
            }
        }
    }

    pub fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.line(format_args!("{diagnostic}"));
    }

    /// A run-level failure: the message and each cause on its own line.
    pub fn fatal(&mut self, err: &(dyn Error + 'static)) {
        self.line(format_args!("{err}"));
        let mut cause = err.source();
        while let Some(e) = cause {
            self.line(format_args!("  caused by: {e}"));
            cause = e.source();
        }
    }

    pub fn summary(&mut self, report: &BuildReport) {
        self.line(format_args!(
            "Rendered {} of {} templates",
            report.rendered.len(),
            report.attempted()
        ));
        if !report.is_success() {
            self.line(format_args!("Failed: {}", report.failed.join(", ")));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn reporter(config: DiagnosticsConfig) -> Reporter<Vec<u8>> {
        Reporter::new(Vec::new(), config)
    }

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn source_context_marks_the_failing_line() {
        let ctx = source_context("one\ntwo\nthree\nfour\n", 3, 1);
        let numbers: Vec<_> = ctx.iter().map(|l| l.number).collect();
        assert_eq!(numbers, [2, 3, 4]);
        assert!(ctx[1].failing);
        assert_eq!(ctx[1].text, "three");
    }

    #[test]
    fn source_context_clamps_at_file_edges() {
        let ctx = source_context("one\ntwo\n", 1, 5);
        let numbers: Vec<_> = ctx.iter().map(|l| l.number).collect();
        assert_eq!(numbers, [1, 2]);
    }

    #[test]
    fn template_diagnostic_layout() {
        let diag = Diagnostic::Template {
            message: "syntax error: unexpected end of input".into(),
            template: "src/bad.twig".into(),
            line: Some(2),
            context: vec![SourceLine {
                number: 2,
                text: "{% if %}".into(),
                failing: true,
            }],
        };
        assert_eq!(
            diag.to_string(),
            "syntax error: unexpected end of input\nsrc/bad.twig line: 2\n>   2 | {% if %}"
        );
    }

    #[test]
    fn runtime_diagnostic_lists_trace_frames() {
        let diag = Diagnostic::Runtime {
            message: "invalid operation".into(),
            trace: vec![
                TraceFrame {
                    template: "src/page.twig".into(),
                    line: Some(3),
                },
                TraceFrame {
                    template: "@components/card.twig".into(),
                    line: Some(1),
                },
            ],
        };
        assert_eq!(
            diag.to_string(),
            "invalid operation\nTrace:\n  src/page.twig:3\n  @components/card.twig:1"
        );
    }

    #[test]
    fn runtime_diagnostic_without_frames_says_so() {
        let diag = Diagnostic::Runtime {
            message: "disk full".into(),
            trace: vec![],
        };
        assert_eq!(diag.to_string(), "disk full\nTrace: (no template frames)");
    }

    #[test]
    fn missing_data_notice_respects_config() {
        let missing = DataFile::Missing {
            path: PathBuf::from("/d/x.json"),
        };

        let mut loud = reporter(DiagnosticsConfig::default());
        loud.data_notice(&missing);
        assert_eq!(output(loud), "No JSON file: /d/x.json\n");

        let mut quiet = reporter(DiagnosticsConfig {
            report_missing_data: false,
            context_lines: 0,
        });
        quiet.data_notice(&missing);
        assert_eq!(output(quiet), "");
    }

    #[test]
    fn invalid_data_notice_is_always_printed() {
        let invalid = DataFile::Invalid {
            path: PathBuf::from("/d/x.json"),
            reason: "EOF".into(),
        };
        let mut quiet = reporter(DiagnosticsConfig {
            report_missing_data: false,
            context_lines: 0,
        });
        quiet.data_notice(&invalid);
        assert_eq!(output(quiet), "Invalid JSON: /d/x.json\n");
    }

    #[test]
    fn fatal_prints_cause_chain() {
        let err = BuildError::Io {
            path: PathBuf::from("/out"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let mut r = reporter(DiagnosticsConfig::default());
        r.fatal(&err);
        let text = output(r);
        assert!(text.starts_with("I/O error at /out: denied\n"), "got: {text}");
        assert!(text.contains("  caused by: denied"), "got: {text}");
    }
}
