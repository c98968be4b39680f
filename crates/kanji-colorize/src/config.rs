//! Configuration types for colorizing KanjiVG diagrams.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! configuration file, and every field has a default matching the command
//! line defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`RenderConfig`] - How each diagram is colored and sized.
//! - [`OutputConfig`] - Where results are written and how files are named.
//! - [`SourceConfig`] - Where the KanjiVG data lives.
//!
//! # Example
//!
//! ```
//! # use kanji_colorize::config::{AppConfig, ImageSize, Mode};
//! let config = AppConfig::default();
//! assert_eq!(config.render().mode(), Mode::Spectrum);
//! assert_eq!(config.render().image_size(), ImageSize::Pixels(327));
//! assert!(config.render().validate().is_ok());
//! ```

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use kanji_colorize_core::{Character, ColorMode};

/// Default saturation of generated colors.
pub const DEFAULT_SATURATION: f64 = 0.95;
/// Default value (brightness) of generated colors.
pub const DEFAULT_VALUE: f64 = 0.75;
/// Default width and height of written diagrams, in pixels.
pub const DEFAULT_IMAGE_SIZE: u32 = 327;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Rendering section.
    #[serde(default)]
    render: RenderConfig,

    /// Output section.
    #[serde(default)]
    output: OutputConfig,

    /// Source data section.
    #[serde(default)]
    source: SourceConfig,
}

impl AppConfig {
    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the source configuration.
    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Splits the configuration into its sections.
    pub fn into_parts(self) -> (RenderConfig, OutputConfig, SourceConfig) {
        (self.render, self.output, self.source)
    }
}

/// How a diagram is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Evenly spaced hues; see [`ColorMode::Spectrum`].
    #[default]
    Spectrum,
    /// Golden ratio hue steps; see [`ColorMode::Contrast`].
    Contrast,
    /// No colors; strokes, numbers and groups get classes and the document
    /// loads a script that styles them.
    CssClass,
}

impl Mode {
    /// Returns the configuration name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Spectrum => "spectrum",
            Mode::Contrast => "contrast",
            Mode::CssClass => "css-class",
        }
    }

    /// The color mode, or `None` when no colors are generated.
    pub fn color_mode(self) -> Option<ColorMode> {
        match self {
            Mode::Spectrum => Some(ColorMode::Spectrum),
            Mode::Contrast => Some(ColorMode::Contrast),
            Mode::CssClass => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spectrum" => Ok(Mode::Spectrum),
            "contrast" => Ok(Mode::Contrast),
            "css-class" => Ok(Mode::CssClass),
            other => Err(format!(
                "unknown mode `{other}`, expected `spectrum`, `contrast` or `css-class`"
            )),
        }
    }
}

/// Target size of written diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawImageSize")]
pub enum ImageSize {
    /// Square size in pixels.
    Pixels(u32),
    /// `100%` of the embedding container.
    Relative,
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::Pixels(DEFAULT_IMAGE_SIZE)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSize::Pixels(pixels) => write!(f, "{pixels}"),
            ImageSize::Relative => f.write_str("relative"),
        }
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relative" => Ok(ImageSize::Relative),
            pixels => pixels.parse().map(ImageSize::Pixels).map_err(|_| {
                format!("invalid image size `{s}`, expected a pixel count or `relative`")
            }),
        }
    }
}

/// Image size as written in a configuration file: `327` or `"relative"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawImageSize {
    Pixels(u32),
    Text(String),
}

impl TryFrom<RawImageSize> for ImageSize {
    type Error = String;

    fn try_from(raw: RawImageSize) -> Result<Self, Self::Error> {
        match raw {
            RawImageSize::Pixels(pixels) => Ok(ImageSize::Pixels(pixels)),
            RawImageSize::Text(text) => text.parse(),
        }
    }
}

/// Settings for [`Mode::CssClass`] output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClassConfig {
    /// Script referenced from the document, resolved relative to it.
    script: String,

    /// Root `onload` handler.
    onload: String,

    /// Optional stylesheet linked through an `xml-stylesheet` instruction.
    stylesheet: Option<String>,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            script: "kanji-colorize.js".to_string(),
            onload: "kanjiColorize(evt)".to_string(),
            stylesheet: None,
        }
    }
}

impl ClassConfig {
    /// Creates a class configuration.
    pub fn new(
        script: impl Into<String>,
        onload: impl Into<String>,
        stylesheet: Option<String>,
    ) -> Self {
        Self {
            script: script.into(),
            onload: onload.into(),
            stylesheet,
        }
    }

    /// Returns the script reference.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Returns the `onload` handler.
    pub fn onload(&self) -> &str {
        &self.onload
    }

    /// Returns the stylesheet reference, if any.
    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }
}

/// How each diagram is colored and sized.
///
/// Setters take and return `self` so command line values can be layered
/// over a loaded file:
///
/// ```
/// # use kanji_colorize::config::{Mode, RenderConfig};
/// let config = RenderConfig::default()
///     .with_mode(Mode::Contrast)
///     .with_saturation(1.0);
/// assert_eq!(config.mode(), Mode::Contrast);
/// assert_eq!(config.value(), 0.75);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    mode: Mode,
    group_mode: bool,
    saturation: f64,
    value: f64,
    image_size: ImageSize,
    classes: ClassConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            group_mode: false,
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
            image_size: ImageSize::default(),
            classes: ClassConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether structural groups are colored instead of single strokes.
    pub fn group_mode(&self) -> bool {
        self.group_mode
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    pub fn classes(&self) -> &ClassConfig {
        &self.classes
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_group_mode(mut self, group_mode: bool) -> Self {
        self.group_mode = group_mode;
        self
    }

    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = image_size;
        self
    }

    /// Checks the ranges of numeric settings.
    ///
    /// # Errors
    ///
    /// Returns a message when saturation or value lies outside `[0, 1]` or
    /// the pixel size is zero.
    pub fn validate(&self) -> Result<(), String> {
        check_unit_range("saturation", self.saturation)?;
        check_unit_range("value", self.value)?;
        if self.image_size == ImageSize::Pixels(0) {
            return Err("image size must be at least one pixel".to_string());
        }
        Ok(())
    }
}

fn check_unit_range(name: &str, number: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&number) {
        Ok(())
    } else {
        Err(format!("{name} must be between 0 and 1, got {number}"))
    }
}

/// How output files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilenameMode {
    /// The character itself, e.g. `字.svg`.
    #[default]
    Character,
    /// The KanjiVG code, e.g. `05b57.svg`.
    Code,
}

impl FilenameMode {
    /// Returns the output file name for `character`.
    pub fn filename(self, character: &Character) -> String {
        match self {
            FilenameMode::Character => character.character_filename(),
            FilenameMode::Code => character.ascii_filename(),
        }
    }
}

impl FromStr for FilenameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(FilenameMode::Character),
            "code" => Ok(FilenameMode::Code),
            other => Err(format!(
                "unknown filename mode `{other}`, expected `character` or `code`"
            )),
        }
    }
}

/// Where and how results are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    directory: PathBuf,
    filename_mode: FilenameMode,
    overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("colorized-kanji"),
            filename_mode: FilenameMode::default(),
            overwrite: true,
        }
    }
}

impl OutputConfig {
    /// Creates an output configuration.
    pub fn new(directory: impl Into<PathBuf>, filename_mode: FilenameMode, overwrite: bool) -> Self {
        Self {
            directory: directory.into(),
            filename_mode,
            overwrite,
        }
    }

    /// Destination directory, created when missing.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn filename_mode(&self) -> FilenameMode {
        self.filename_mode
    }

    /// Whether existing files are replaced rather than skipped.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Full destination path for `character`.
    pub fn path_for(&self, character: &Character) -> PathBuf {
        self.directory.join(self.filename_mode.filename(character))
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_filename_mode(mut self, filename_mode: FilenameMode) -> Self {
        self.filename_mode = filename_mode;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Where the KanjiVG data lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// KanjiVG `kanji` directory; searched for when unset.
    directory: Option<PathBuf>,
}

impl SourceConfig {
    /// Creates a source configuration.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}
