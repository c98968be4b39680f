//! Error adapter for converting ColorizeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Markup errors are
//! rendered against the document text with the failing span labeled.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use kanji_colorize::ColorizeError;
use kanji_colorize_markup::{ParseError, Span};

/// Adapter for a markup error together with its document text.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped parse error
    err: &'a ParseError,
    /// Document text for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a ParseError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("kanji_colorize::markup"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.err
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(
            Some(self.err.label().to_string()),
            span_to_miette(self.err.span()),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-diagnostic [`ColorizeError`] variants.
///
/// This adapter handles errors that don't carry a source location, such as
/// I/O errors, missing characters and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a ColorizeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ColorizeError::Io(_) => "kanji_colorize::io",
            ColorizeError::NotFound { .. } => "kanji_colorize::not_found",
            ColorizeError::Markup { .. } => return None,
            ColorizeError::Config(_) => "kanji_colorize::config",
            ColorizeError::Character(_) => "kanji_colorize::character",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ColorizeError::NotFound { .. } => Some(Box::new(
                "KanjiVG has no data for this character; check --source-directory",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a markup diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A markup error with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a markup [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`ColorizeError`] into a list of reportable errors.
pub fn to_reportables(err: &ColorizeError) -> Vec<Reportable<'_>> {
    match err {
        ColorizeError::Markup { err: parse_err, src } => {
            vec![Reportable::Diagnostic(DiagnosticAdapter::new(parse_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use kanji_colorize::Character;
    use kanji_colorize_markup::parse;

    use super::*;

    fn markup_error(src: &str) -> ColorizeError {
        let err = parse(src).unwrap_err();
        ColorizeError::new_markup_error(err, src)
    }

    #[test]
    fn test_markup_error_is_diagnostic() {
        let err = markup_error("<svg><g></svg>");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "expected end tag `</g>`");
                assert!(d.source_code().is_some());
                assert_eq!(d.code().unwrap().to_string(), "kanji_colorize::markup");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_label_points_at_span() {
        let err = ParseError::new("bad", Span::new(8..10), "here", Some("try this".to_string()));
        let adapter = DiagnosticAdapter::new(&err, "<svg><g></svg>");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("here"));
        assert_eq!(labels[0].offset(), 8);
        assert_eq!(labels[0].len(), 2);
        assert!(labels[0].primary());
        assert_eq!(adapter.help().unwrap().to_string(), "try this");
    }

    #[test]
    fn test_non_markup_errors() {
        let err = ColorizeError::Config("bad value".to_string());
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad value");
                assert_eq!(e.code().unwrap().to_string(), "kanji_colorize::config");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_error_codes() {
        let code = |err: &ColorizeError| ErrorAdapter(err).code().map(|c| c.to_string());

        let io_err = ColorizeError::Io(io::Error::other("disk full"));
        assert_eq!(code(&io_err).as_deref(), Some("kanji_colorize::io"));

        let not_found = ColorizeError::NotFound {
            character: Character::new('Л'),
            path: PathBuf::from("kanji/0041b.svg"),
        };
        assert_eq!(code(&not_found).as_deref(), Some("kanji_colorize::not_found"));
        assert!(ErrorAdapter(&not_found).help().is_some());
    }
}
