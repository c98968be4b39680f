//! Access to a directory of KanjiVG files.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};

use kanji_colorize_core::Character;

use crate::{config::SourceConfig, error::ColorizeError};

/// Directories searched, relative to the working directory, when no source
/// directory is configured.
pub const SEARCH_PATHS: [&str; 3] = ["kanji", "kanjivg/kanji", "../kanjivg/kanji"];

/// A directory of KanjiVG files named `<code>[-<variant>].svg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiVg {
    directory: PathBuf,
}

impl KanjiVg {
    /// Uses `directory` as the KanjiVG `kanji` directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Finds the first existing directory in [`SEARCH_PATHS`].
    pub fn discover() -> Option<Self> {
        Self::discover_in(Path::new("."))
    }

    /// Finds the first existing directory in [`SEARCH_PATHS`] below `base`.
    pub fn discover_in(base: &Path) -> Option<Self> {
        SEARCH_PATHS
            .iter()
            .map(|candidate| base.join(candidate))
            .find(|candidate| candidate.is_dir())
            .map(Self::new)
    }

    /// Opens the configured directory, or discovers one.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::Config`] when the configured path is not a
    /// directory or no directory can be found.
    pub fn from_config(config: &SourceConfig) -> Result<Self, ColorizeError> {
        match config.directory() {
            Some(directory) if directory.is_dir() => Ok(Self::new(directory)),
            Some(directory) => Err(ColorizeError::Config(format!(
                "KanjiVG directory {} does not exist",
                directory.display()
            ))),
            None => {
                let source = Self::discover().ok_or_else(|| {
                    ColorizeError::Config(format!(
                        "no KanjiVG directory found, looked in {}",
                        SEARCH_PATHS.join(", ")
                    ))
                })?;
                info!(path = source.directory.display().to_string(); "Found KanjiVG data");
                Ok(source)
            }
        }
    }

    /// The `kanji` directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file holding `character`.
    pub fn path_for(&self, character: &Character) -> PathBuf {
        self.directory.join(character.ascii_filename())
    }

    /// Reads the diagram of `character`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::NotFound`] when there is no file for the
    /// character; any other I/O error is passed through.
    pub fn load(&self, character: &Character) -> Result<String, ColorizeError> {
        let path = self.path_for(character);
        match fs::read_to_string(&path) {
            Ok(svg) => Ok(svg),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ColorizeError::NotFound {
                character: character.clone(),
                path,
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Every character and variant in the directory, sorted.
    ///
    /// Files whose names are not KanjiVG names are ignored.
    pub fn list(&self) -> Result<Vec<Character>, ColorizeError> {
        let mut characters = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            match Character::from_ascii_filename(name) {
                Ok(character) => characters.push(character),
                Err(err) => debug!(file = name, err:% = err; "Skipping file"),
            }
        }
        characters.sort();
        Ok(characters)
    }
}
