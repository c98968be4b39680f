//! KanjiVG character identities.
//!
//! A [`Character`] is a single Unicode scalar value plus an optional variant
//! name, such as `字` with the `Kaisho` variant. KanjiVG stores each one in a
//! file named after the zero-padded hex code point, `05b57-Kaisho.svg`.
//!
//! # Examples
//!
//! ```
//! use kanji_colorize_core::Character;
//!
//! let kanji: Character = "字-Kaisho".parse().unwrap();
//! assert_eq!(kanji.ascii_filename(), "05b57-Kaisho.svg");
//! assert_eq!(kanji.character_filename(), "字-Kaisho.svg");
//!
//! let from_file = Character::from_ascii_filename("05b57-Kaisho.svg").unwrap();
//! assert_eq!(from_file, kanji);
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors produced when building a [`Character`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    #[error("empty character")]
    Empty,

    #[error("`{0}` is more than one character")]
    MultipleCharacters(String),

    #[error("`{0}` is not a KanjiVG file name")]
    InvalidFilename(String),

    #[error("variant `{0}` may only contain ASCII letters and digits")]
    InvalidVariant(String),
}

/// A character and optional variant with KanjiVG data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Character {
    character: char,
    variant: Option<String>,
}

impl Character {
    /// Creates a character without a variant.
    pub fn new(character: char) -> Self {
        Self {
            character,
            variant: None,
        }
    }

    /// Creates a character with a variant name.
    ///
    /// An empty variant name is the same as no variant.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::InvalidVariant`] unless the variant is made
    /// of ASCII letters and digits only. The variant becomes part of a file
    /// name, so separators and dots are never accepted.
    pub fn with_variant(character: char, variant: impl Into<String>) -> Result<Self, CharacterError> {
        let variant = variant.into();
        if !variant.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CharacterError::InvalidVariant(variant));
        }
        Ok(Self {
            character,
            variant: (!variant.is_empty()).then_some(variant),
        })
    }

    /// Returns the character.
    pub fn character(&self) -> char {
        self.character
    }

    /// Returns the variant name, if any.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns the code point as five or more lowercase hex digits.
    ///
    /// ```
    /// use kanji_colorize_core::Character;
    ///
    /// assert_eq!(Character::new('a').code(), "00061");
    /// assert_eq!(Character::new('𦥑').code(), "26951");
    /// ```
    pub fn code(&self) -> String {
        format!("{:05x}", u32::from(self.character))
    }

    /// Returns the KanjiVG file name, `<code>[-<variant>].svg`.
    pub fn ascii_filename(&self) -> String {
        self.filename_with_stem(&self.code())
    }

    /// Returns a file name that uses the character itself.
    ///
    /// Characters that are not alphanumeric fall back to the hex code, and
    /// lowercase ASCII letters get a `_` suffix so `a.svg` and `A.svg` cannot
    /// collide on case-insensitive filesystems.
    ///
    /// ```
    /// use kanji_colorize_core::Character;
    ///
    /// assert_eq!(Character::new('漢').character_filename(), "漢.svg");
    /// assert_eq!(Character::new('a').character_filename(), "a_.svg");
    /// assert_eq!(Character::new('A').character_filename(), "A.svg");
    /// assert_eq!(Character::new('/').character_filename(), "0002f.svg");
    /// ```
    pub fn character_filename(&self) -> String {
        let c = self.character;
        let stem = if !c.is_alphanumeric() {
            self.code()
        } else if c.is_ascii_lowercase() {
            format!("{c}_")
        } else {
            c.to_string()
        };
        self.filename_with_stem(&stem)
    }

    /// Parses a KanjiVG file name such as `06f22.svg` or `05b57-Kaisho.svg`.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::InvalidFilename`] when the name lacks the
    /// `.svg` extension, the hex code is missing or malformed, the code is
    /// not a Unicode scalar value, or the variant is not alphanumeric.
    pub fn from_ascii_filename(filename: &str) -> Result<Self, CharacterError> {
        let invalid = || CharacterError::InvalidFilename(filename.to_string());

        let stem = filename.strip_suffix(".svg").ok_or_else(invalid)?;
        let (code, variant) = match stem.split_once('-') {
            Some((code, variant)) => (code, variant),
            None => (stem, ""),
        };
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let character = u32::from_str_radix(code, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(invalid)?;

        Self::with_variant(character, variant).map_err(|_| invalid())
    }

    fn filename_with_stem(&self, stem: &str) -> String {
        match &self.variant {
            Some(variant) => format!("{stem}-{variant}.svg"),
            None => format!("{stem}.svg"),
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{}-{variant}", self.character),
            None => write!(f, "{}", self.character),
        }
    }
}

impl FromStr for Character {
    type Err = CharacterError;

    /// Parses `字` or `字-Kaisho`. The part before the first `-` must be
    /// exactly one Unicode scalar value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, variant) = match s.split_once('-') {
            // a lone "-" is the hyphen-minus character itself
            Some((head, variant)) if !head.is_empty() => (head, variant),
            _ => (s, ""),
        };

        let mut chars = head.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(CharacterError::Empty),
            (Some(character), None) => Self::with_variant(character, variant),
            (Some(_), Some(_)) => Err(CharacterError::MultipleCharacters(head.to_string())),
        }
    }
}

impl From<char> for Character {
    fn from(character: char) -> Self {
        Self::new(character)
    }
}
