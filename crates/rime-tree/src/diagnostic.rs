//! Diagnostic values for non-fatal resolution problems.
//!
//! Resolution and stringification report data-quality problems through
//! `on_error` callbacks carrying [`Diagnostic`] values, so a pipeline can
//! collect every problem in a document without aborting early. Fatal
//! problems are `Result` errors instead and never travel this path.

use ariadne::{Color, Label, Report, ReportKind, Source};
use rime_cst::Span;

/// A non-fatal problem found while resolving or stringifying.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Human-readable description.
    pub message: String,
    /// Source location, when the offending node has one.
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Create a diagnostic with no source location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Render this diagnostic with ariadne.
    ///
    /// Returns a string containing the formatted report with source
    /// context when a span is available.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let range = self.span.map(|s| s.range()).unwrap_or(0..0);
        let mut report = Report::build(ReportKind::Warning, (filename, range.clone()))
            .with_message(&self.message);
        if self.span.is_some() {
            report = report.with_label(
                Label::new((filename, range))
                    .with_message(&self.message)
                    .with_color(Color::Yellow),
            );
        }
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.span {
            write!(f, " at offset {}", span.start)?;
        }
        Ok(())
    }
}
