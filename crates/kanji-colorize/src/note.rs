//! Filling flashcard notes with diagrams.
//!
//! A note-taking host implements [`Note`] and [`MediaStore`]; a
//! [`NoteFiller`] then reads characters from a note's `Kanji` field, stores
//! a colored diagram for each one, and writes `<img>` references to the
//! `Diagram` field. Persisting the note is left to the host.

use std::{fmt, io};

use log::{debug, info, warn};

use kanji_colorize_core::Character;
use kanji_colorize_markup::{escape_attribute, unescape};

use crate::{Colorizer, error::ColorizeError, kanjivg::KanjiVg};

/// Field the characters are read from.
pub const SOURCE_FIELD: &str = "Kanji";
/// Field the image references are written to.
pub const DESTINATION_FIELD: &str = "Diagram";

/// A flashcard note.
pub trait Note {
    /// Name of the note's model (note type).
    fn model_name(&self) -> &str;

    /// Contents of a field, or `None` if the model has no such field.
    fn field(&self, name: &str) -> Option<&str>;

    /// Replaces the contents of a field.
    fn set_field(&mut self, name: &str, value: String);
}

/// Storage for media files referenced from notes.
pub trait MediaStore {
    /// Stores `data` under a name derived from `filename`.
    ///
    /// Returns the name the file was actually stored as.
    fn store(&mut self, filename: &str, data: &[u8]) -> io::Result<String>;
}

/// Returns `true` for notes this module fills.
///
/// The model name must mention Japanese and the model must have both the
/// source and destination fields.
pub fn model_is_correct_type<N: Note + ?Sized>(note: &N) -> bool {
    note.model_name().to_lowercase().contains("japanese")
        && note.field(SOURCE_FIELD).is_some()
        && note.field(DESTINATION_FIELD).is_some()
}

/// Picks the characters of `text` that get a diagram.
///
/// A single character is always used. In longer text only CJK unified
/// ideographs are used, and if there are none, every non-whitespace
/// character is.
pub fn characters_to_colorize(text: &str) -> Vec<char> {
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return vec![c];
    }

    let kanji: Vec<char> = text.chars().filter(|c| is_kanji(*c)).collect();
    if !kanji.is_empty() {
        return kanji;
    }
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_kanji(c: char) -> bool {
    ('\u{4e00}'..='\u{9faf}').contains(&c)
}

/// Removes tags and `[sound:...]` references, then decodes entities.
pub fn strip_markup(field: &str) -> String {
    let mut text = String::with_capacity(field.len());
    let mut rest = field;
    loop {
        let next_tag = rest.find('<');
        let next_sound = rest.find("[sound:");
        let (start, close) = match (next_tag, next_sound) {
            (Some(tag), Some(sound)) if sound < tag => (sound, ']'),
            (Some(tag), _) => (tag, '>'),
            (None, Some(sound)) => (sound, ']'),
            (None, None) => break,
        };
        text.push_str(&rest[..start]);
        match rest[start..].find(close) {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = "";
                break;
            }
        }
    }
    text.push_str(rest);
    unescape(&text).into_owned()
}

/// Outcome of regenerating every note.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegenerateReport {
    /// Notes whose destination field was rewritten.
    pub updated: usize,
    /// Notes of another model.
    pub skipped: usize,
    /// Notes whose diagrams could not be produced.
    pub failed: usize,
}

impl fmt::Display for RegenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} skipped, {} failed",
            self.updated, self.skipped, self.failed
        )
    }
}

/// Fills notes with diagrams from one source.
#[derive(Debug, Clone, Copy)]
pub struct NoteFiller<'a> {
    colorizer: &'a Colorizer,
    source: &'a KanjiVg,
}

impl<'a> NoteFiller<'a> {
    pub fn new(colorizer: &'a Colorizer, source: &'a KanjiVg) -> Self {
        Self { colorizer, source }
    }

    /// Handles the editor leaving `field` of `note`.
    ///
    /// Only leaving the source field fills the note, and only when the
    /// destination is still empty. Returns whether the note was changed.
    pub fn on_focus_lost<N, M>(
        &self,
        note: &mut N,
        media: &mut M,
        field: &str,
    ) -> Result<bool, ColorizeError>
    where
        N: Note + ?Sized,
        M: MediaStore + ?Sized,
    {
        if field != SOURCE_FIELD {
            return Ok(false);
        }
        self.fill_note(note, media, false)
    }

    /// Writes diagrams for the characters of the source field.
    ///
    /// Notes of another model are left alone, as are notes with a
    /// destination already set unless `force` is given. Characters without
    /// data are skipped silently. Returns whether the note was changed.
    ///
    /// # Errors
    ///
    /// Returns an error when a diagram cannot be parsed or stored.
    pub fn fill_note<N, M>(&self, note: &mut N, media: &mut M, force: bool) -> Result<bool, ColorizeError>
    where
        N: Note + ?Sized,
        M: MediaStore + ?Sized,
    {
        if !model_is_correct_type(note) {
            return Ok(false);
        }
        if !force && note.field(DESTINATION_FIELD).is_some_and(|value| !value.is_empty()) {
            return Ok(false);
        }

        let text = strip_markup(note.field(SOURCE_FIELD).unwrap_or_default());
        let mut images = String::new();
        for c in characters_to_colorize(&text) {
            let character = Character::new(c);
            let svg = match self.colorizer.colored_svg(self.source, &character) {
                Ok(svg) => svg,
                Err(ColorizeError::NotFound { .. }) => {
                    debug!(character:% = character; "No diagram for character");
                    continue;
                }
                Err(err) => return Err(err),
            };
            let stored = media.store(&character.ascii_filename(), svg.as_bytes())?;
            images.push_str(&format!("<img src=\"{}\">", escape_attribute(&stored)));
        }

        note.set_field(DESTINATION_FIELD, images);
        Ok(true)
    }

    /// Rewrites the destination of every matching note.
    ///
    /// Diagrams that fail to parse are logged and counted; I/O errors stop
    /// the run.
    pub fn regenerate_all<'n, N, M, I>(&self, notes: I, media: &mut M) -> Result<RegenerateReport, ColorizeError>
    where
        N: Note + ?Sized + 'n,
        M: MediaStore + ?Sized,
        I: IntoIterator<Item = &'n mut N>,
    {
        let mut report = RegenerateReport::default();
        for note in notes {
            if !model_is_correct_type(note) {
                report.skipped += 1;
                continue;
            }
            match self.fill_note(note, media, true) {
                Ok(_) => report.updated += 1,
                Err(err) if err.is_per_character() => {
                    warn!(err:% = err; "Could not regenerate note");
                    report.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }
        info!(report:% = report; "Regenerated diagrams");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_character_is_used() {
        assert_eq!(characters_to_colorize("字"), ['字']);
        assert_eq!(characters_to_colorize("a"), ['a']);
        assert!(characters_to_colorize("").is_empty());
    }

    #[test]
    fn test_only_kanji_in_longer_text() {
        assert_eq!(characters_to_colorize("漢字です"), ['漢', '字']);
        assert_eq!(characters_to_colorize(" 字 "), ['字']);
    }

    #[test]
    fn test_fallback_without_kanji() {
        assert_eq!(characters_to_colorize("あい う"), ['あ', 'い', 'う']);
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>漢</b>字"), "漢字");
        assert_eq!(strip_markup("字[sound:ji.mp3]<br/>"), "字");
        assert_eq!(strip_markup("a &amp; b"), "a & b");
        assert_eq!(strip_markup("unclosed <b"), "unclosed ");
    }

    #[test]
    fn test_regenerate_report_display() {
        let report = RegenerateReport {
            updated: 2,
            skipped: 1,
            failed: 0,
        };
        assert_eq!(report.to_string(), "2 updated, 1 skipped, 0 failed");
    }
}
