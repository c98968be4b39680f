//! Kanji Colorize - colored stroke order diagrams from KanjiVG data.
//!
//! Each KanjiVG file is parsed into a markup tree, its strokes (or
//! structural groups) are painted from a deterministic color sequence, the
//! drawing is resized, and a note about the changes is added above the
//! original copyright notice.

pub mod batch;
pub mod config;
pub mod kanjivg;
pub mod note;
pub mod transform;

mod error;

pub use kanji_colorize_core::{Character, CharacterError, Color, ColorMode, color};
pub use kanji_colorize_markup as markup;

pub use error::ColorizeError;

use log::{debug, info, trace};

use batch::{BatchReport, Selection};
use config::{OutputConfig, RenderConfig};
use kanjivg::KanjiVg;
use transform::Transformer;

/// Colorizes KanjiVG diagrams with one [`RenderConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use kanji_colorize::{Character, Colorizer, config::RenderConfig, kanjivg::KanjiVg};
///
/// let colorizer = Colorizer::new(RenderConfig::default())
///     .expect("Default configuration is valid");
/// let source = KanjiVg::new("kanjivg/kanji");
///
/// let svg = colorizer.colored_svg(&source, &Character::new('字'))
///     .expect("Failed to colorize");
/// println!("{svg}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Colorizer {
    config: RenderConfig,
}

impl Colorizer {
    /// Create a colorizer after checking the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::Config`] when saturation or value is outside
    /// `[0, 1]` or the image size is zero.
    pub fn new(config: RenderConfig) -> Result<Self, ColorizeError> {
        config.validate().map_err(ColorizeError::Config)?;
        debug!(
            mode:% = config.mode(),
            group_mode = config.group_mode(),
            saturation = config.saturation(),
            value = config.value(),
            image_size:% = config.image_size();
            "Created colorizer"
        );
        Ok(Self { config })
    }

    /// The render configuration in use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Rewrites the text of a KanjiVG document.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::Markup`] when `svg` is not well-formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanji_colorize::{Colorizer, config::RenderConfig};
    ///
    /// let colorizer = Colorizer::default();
    /// let svg = colorizer
    ///     .modify_svg(r#"<svg width="109" height="109" viewBox="0 0 109 109"><path d="M1,1"/></svg>"#)
    ///     .unwrap();
    /// assert_eq!(
    ///     svg,
    ///     r#"<svg width="327" height="327" viewBox="0 0 327 327"><path d="M1,1" style="stroke:#bf0909"/></svg>"#
    /// );
    /// ```
    pub fn modify_svg(&self, svg: &str) -> Result<String, ColorizeError> {
        let mut document = markup::parse(svg).map_err(|err| ColorizeError::new_markup_error(err, svg))?;
        Transformer::new(&self.config).apply(&mut document);

        let modified = document.to_string();
        trace!(len = modified.len(); "Modified document");
        Ok(modified)
    }

    /// Loads `character` from `source` and rewrites it.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::NotFound`] when there is no data for the
    /// character, or any error of [`Colorizer::modify_svg`].
    pub fn colored_svg(&self, source: &KanjiVg, character: &Character) -> Result<String, ColorizeError> {
        info!(character:% = character; "Colorizing character");
        let svg = source.load(character)?;
        self.modify_svg(&svg)
    }

    /// Writes diagrams for `selection` into the output directory.
    ///
    /// Characters without data or with malformed documents are recorded in
    /// the report; the run continues with the next character.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::Io`] when listing the source, creating the
    /// output directory or writing a file fails.
    pub fn write_all(
        &self,
        source: &KanjiVg,
        selection: &Selection,
        output: &OutputConfig,
    ) -> Result<BatchReport, ColorizeError> {
        batch::write_all(self, source, selection, output)
    }
}
