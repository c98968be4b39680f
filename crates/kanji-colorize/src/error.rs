//! Error types for colorizing operations.
//!
//! This module provides the main error type [`ColorizeError`] which wraps
//! the error conditions that can occur while loading, rewriting and writing
//! diagrams.

use std::{io, path::PathBuf};

use thiserror::Error;

use kanji_colorize_core::{Character, CharacterError};
use kanji_colorize_markup::ParseError;

/// The main error type for colorizing operations.
///
/// # Diagnostic Variants
///
/// The `Markup` variant carries the document text alongside the parse error,
/// so the error span can be rendered against its source.
#[derive(Debug, Error)]
pub enum ColorizeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no KanjiVG data for `{character}` at {}", path.display())]
    NotFound { character: Character, path: PathBuf },

    #[error("{err}")]
    Markup { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid character: {0}")]
    Character(#[from] CharacterError),
}

impl ColorizeError {
    /// Create a new `Markup` error with the associated document text.
    pub fn new_markup_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Markup {
            err,
            src: src.into(),
        }
    }

    /// Returns `true` for failures that only concern one character.
    ///
    /// Batch operations record these and continue with the next character.
    pub fn is_per_character(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Markup { .. } | Self::Character(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_character_errors() {
        let bad_entry = ColorizeError::from(CharacterError::MultipleCharacters("字字".to_string()));
        assert!(bad_entry.is_per_character());

        let not_found = ColorizeError::NotFound {
            character: Character::new('Л'),
            path: PathBuf::from("0041b.svg"),
        };
        assert!(not_found.is_per_character());

        assert!(!ColorizeError::Io(io::Error::other("disk full")).is_per_character());
        assert!(!ColorizeError::Config("bad".to_string()).is_per_character());
    }
}
