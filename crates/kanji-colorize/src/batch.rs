//! Writing many diagrams at once.

use std::{fmt, fs, path::PathBuf};

use log::{debug, info, warn};

use kanji_colorize_core::{Character, CharacterError};

use crate::{Colorizer, config::OutputConfig, error::ColorizeError, kanjivg::KanjiVg};

/// Which characters a batch covers.
///
/// The default selection is everything in the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    characters: Option<Vec<Character>>,
    rejected: Vec<(String, CharacterError)>,
}

impl Selection {
    /// Parses a character list.
    ///
    /// Without commas every non-whitespace character is one entry. With
    /// commas the entries are separated by them and may carry a variant. A
    /// lone `,` is the comma character itself. Entries that do not name a
    /// character are kept aside and reported when the batch runs.
    ///
    /// ```
    /// # use kanji_colorize::batch::Selection;
    /// # use kanji_colorize_core::Character;
    /// let plain = Selection::parse("漢字");
    /// assert_eq!(
    ///     plain.characters(),
    ///     Some(&[Character::new('漢'), Character::new('字')][..])
    /// );
    ///
    /// let variants = Selection::parse("漢, 字-Kaisho, 字字");
    /// assert_eq!(
    ///     variants.characters(),
    ///     Some(&[Character::new('漢'), "字-Kaisho".parse().unwrap()][..])
    /// );
    /// assert_eq!(variants.rejected().len(), 1);
    /// ```
    pub fn parse(list: &str) -> Self {
        let mut characters = Vec::new();
        let mut rejected = Vec::new();
        if list.contains(',') && list.trim() != "," {
            for entry in list.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
                match entry.parse() {
                    Ok(character) => characters.push(character),
                    Err(err) => rejected.push((entry.to_string(), err)),
                }
            }
        } else {
            characters.extend(list.chars().filter(|c| !c.is_whitespace()).map(Character::new));
        }
        Self {
            characters: Some(characters),
            rejected,
        }
    }

    /// The listed characters, or `None` for every character in the source.
    pub fn characters(&self) -> Option<&[Character]> {
        self.characters.as_deref()
    }

    /// List entries that do not name a character, with the reason.
    pub fn rejected(&self) -> &[(String, CharacterError)] {
        &self.rejected
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    written: Vec<PathBuf>,
    skipped: Vec<PathBuf>,
    failed: Vec<(String, ColorizeError)>,
}

impl BatchReport {
    /// Files written.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Existing files left in place.
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// List entries and characters that could not be colorized, with the
    /// reason.
    pub fn failed(&self) -> &[(String, ColorizeError)] {
        &self.failed
    }

    /// Returns `true` when no character failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} written, {} skipped, {} failed",
            self.written.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }
}

/// Colorizes `selection` from `source` into the output directory.
///
/// Rejected list entries, missing characters and malformed documents are
/// recorded in the report and the run continues. I/O errors stop the run.
pub(crate) fn write_all(
    colorizer: &Colorizer,
    source: &KanjiVg,
    selection: &Selection,
    output: &OutputConfig,
) -> Result<BatchReport, ColorizeError> {
    let characters = match selection.characters() {
        Some(characters) => characters.to_vec(),
        None => source.list()?,
    };
    info!(
        count = characters.len(),
        directory = output.directory().display().to_string();
        "Colorizing characters"
    );

    fs::create_dir_all(output.directory())?;

    let mut report = BatchReport::default();
    for (entry, err) in selection.rejected() {
        warn!(entry = entry.as_str(), err:% = err; "Skipping list entry");
        report.failed.push((entry.clone(), err.clone().into()));
    }
    for character in characters {
        let destination = output.path_for(&character);
        if !output.overwrite() && destination.exists() {
            debug!(path = destination.display().to_string(); "Skipping existing file");
            report.skipped.push(destination);
            continue;
        }

        match colorizer.colored_svg(source, &character) {
            Ok(svg) => {
                fs::write(&destination, svg)?;
                debug!(character:% = character, path = destination.display().to_string(); "Wrote diagram");
                report.written.push(destination);
            }
            Err(err) if err.is_per_character() => {
                warn!(character:% = character, err:% = err; "Skipping character");
                report.failed.push((character.to_string(), err));
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len();
        "Batch finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(selection: &Selection) -> &[Character] {
        selection.characters().unwrap_or_default()
    }

    #[test]
    fn test_selection_without_commas() {
        assert_eq!(
            listed(&Selection::parse("a 字\n")),
            [Character::new('a'), Character::new('字')]
        );
        assert!(listed(&Selection::parse("")).is_empty());
        assert_eq!(listed(&Selection::parse(",")), [Character::new(',')]);
        assert_eq!(Selection::default().characters(), None);
    }

    #[test]
    fn test_selection_with_commas() {
        let selection = Selection::parse("字-Kaisho,-,a,");
        assert_eq!(
            listed(&selection),
            [
                Character::with_variant('字', "Kaisho").unwrap(),
                Character::new('-'),
                Character::new('a'),
            ]
        );
        assert!(selection.rejected().is_empty());
    }

    #[test]
    fn test_selection_keeps_bad_entries_aside() {
        let selection = Selection::parse("漢字, a, 字-../x");
        assert_eq!(listed(&selection), [Character::new('a')]);
        assert_eq!(
            selection.rejected(),
            [
                (
                    "漢字".to_string(),
                    CharacterError::MultipleCharacters("漢字".to_string())
                ),
                (
                    "字-../x".to_string(),
                    CharacterError::InvalidVariant("../x".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_report_display() {
        let mut report = BatchReport::default();
        report.written.push(PathBuf::from("a_.svg"));
        report.failed.push((
            "Л".to_string(),
            ColorizeError::NotFound {
                character: Character::new('Л'),
                path: PathBuf::from("0041b.svg"),
            },
        ));
        assert_eq!(report.to_string(), "1 written, 0 skipped, 1 failed");
        assert!(!report.is_success());
    }
}
