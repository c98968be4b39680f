use thiserror::Error;

use crate::span::Span;

/// A markup syntax error with its location in the source text.
///
/// This error provides:
/// - A precise location ([`Span`]) in the source
/// - A descriptive message and label
/// - Optional help text
///
/// The source text itself is kept by the container error type (for example
/// `ColorizeError::Markup`), so the error can be rendered with a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Error message to display
    message: String,

    /// The error span in the source
    span: Span,

    /// Label for the error span
    label: String,

    /// Optional help text
    help: Option<String>,
}

impl ParseError {
    /// Create a new parse error.
    ///
    /// # Arguments
    /// * `message` - The main error message
    /// * `span` - The source location where the error occurred
    /// * `label` - A label describing the error location
    /// * `help` - Optional help text
    pub fn new(
        message: impl Into<String>,
        span: Span,
        label: impl Into<String>,
        help: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            label: label.into(),
            help,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the error span in the source code.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label describing the error.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the help text, if any
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// A type alias for `Result<T, ParseError>`
pub type Result<T> = std::result::Result<T, ParseError>;
