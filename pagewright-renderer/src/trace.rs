//! Template-level failure traces.
//!
//! A render failure arrives as an error with a `source()` chain. Some links
//! are engine errors attributed to a template (the include or extends site,
//! then the template that actually failed); the rest are wrappers. The
//! engine adapter implements [`FailureOrigin`] to map a link back to its
//! template; [`template_trace`] keeps only the links it can map.

use std::error::Error;
use std::fmt;

/// One template in a reconstructed trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub template: String,
    pub line: Option<usize>,
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.template, line),
            None => f.write_str(&self.template),
        }
    }
}

/// Capability to recover the originating template of one failure frame.
pub trait FailureOrigin {
    /// `None` for frames that do not belong to a template.
    fn resolve_failure_origin(&self, frame: &(dyn Error + 'static)) -> Option<TraceFrame>;
}

/// Walk `err` and its causes in order, keeping every frame `origin` resolves.
pub fn template_trace(err: &(dyn Error + 'static), origin: &dyn FailureOrigin) -> Vec<TraceFrame> {
    let mut frames = Vec::new();
    let mut current = Some(err);
    while let Some(frame) = current {
        if let Some(resolved) = origin.resolve_failure_origin(frame) {
            frames.push(resolved);
        }
        current = frame.source();
    }
    frames
}

/// Every engine error in `err`'s cause chain, outermost first.
pub fn engine_errors<'a>(err: &'a (dyn Error + 'static)) -> Vec<&'a minijinja::Error> {
    let mut found = Vec::new();
    let mut current = Some(err);
    while let Some(frame) = current {
        if let Some(engine_err) = frame.downcast_ref::<minijinja::Error>() {
            found.push(engine_err);
        }
        current = frame.source();
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::ErrorKind;

    struct NamedFrames;

    impl FailureOrigin for NamedFrames {
        fn resolve_failure_origin(&self, frame: &(dyn Error + 'static)) -> Option<TraceFrame> {
            let err = frame.downcast_ref::<minijinja::Error>()?;
            Some(TraceFrame {
                template: err.detail()?.to_string(),
                line: None,
            })
        }
    }

    #[test]
    fn frames_follow_chain_order_and_skip_foreign_links() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "not a template");
        let inner = minijinja::Error::new(ErrorKind::InvalidOperation, "inner.twig").with_source(io);
        let outer = minijinja::Error::new(ErrorKind::BadInclude, "outer.twig").with_source(inner);

        let frames = template_trace(&outer, &NamedFrames);
        let names: Vec<_> = frames.iter().map(|f| f.template.as_str()).collect();
        assert_eq!(names, ["outer.twig", "inner.twig"]);
        assert_eq!(engine_errors(&outer).len(), 2);
    }

    #[test]
    fn non_engine_error_has_empty_trace() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(template_trace(&io, &NamedFrames).is_empty());
    }

    #[test]
    fn frame_display_includes_line_when_known() {
        let frame = TraceFrame {
            template: "@components/card.twig".into(),
            line: Some(4),
        };
        assert_eq!(frame.to_string(), "@components/card.twig:4");
    }
}
