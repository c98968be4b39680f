//! Command-line argument definitions for the kanji-colorize CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every rendering and output option is optional so that
//! values from the configuration file apply unless a flag overrides them.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use kanji_colorize::config::{FilenameMode, ImageSize, Mode, OutputConfig, RenderConfig, SourceConfig};

/// An `on`/`off` switch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

/// Command-line arguments for the kanji-colorize tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Coloring mode: spectrum, contrast or css-class
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Saturation of generated colors, from 0 (gray) to 1 (fully colorful)
    #[arg(long)]
    pub saturation: Option<f64>,

    /// Value of generated colors, from 0 (black) to 1 (fully bright)
    #[arg(long)]
    pub value: Option<f64>,

    /// Image size in pixels, or `relative` to fill the container
    #[arg(long)]
    pub image_size: Option<ImageSize>,

    /// Color structural groups instead of single strokes
    #[arg(long, value_enum)]
    pub group_mode: Option<Switch>,

    /// Characters to colorize; all characters in the source when omitted.
    /// Separate entries with commas to select variants, e.g. `字-Kaisho`.
    #[arg(long)]
    pub characters: Option<String>,

    /// Name output files by character or by KanjiVG code
    #[arg(long)]
    pub filename_mode: Option<FilenameMode>,

    /// Directory the colored diagrams are written to
    #[arg(short, long)]
    pub output_directory: Option<PathBuf>,

    /// KanjiVG `kanji` directory
    #[arg(short, long)]
    pub source_directory: Option<PathBuf>,

    /// Leave existing output files in place
    #[arg(long, conflicts_with = "overwrite")]
    pub skip_existing: bool,

    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Applies the rendering flags given on the command line to `config`.
    pub fn render_config(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        if let Some(saturation) = self.saturation {
            config = config.with_saturation(saturation);
        }
        if let Some(value) = self.value {
            config = config.with_value(value);
        }
        if let Some(image_size) = self.image_size {
            config = config.with_image_size(image_size);
        }
        if let Some(group_mode) = self.group_mode {
            config = config.with_group_mode(group_mode.is_on());
        }
        config
    }

    /// Applies the output flags given on the command line to `config`.
    pub fn output_config(&self, mut config: OutputConfig) -> OutputConfig {
        if let Some(directory) = &self.output_directory {
            config = config.with_directory(directory);
        }
        if let Some(filename_mode) = self.filename_mode {
            config = config.with_filename_mode(filename_mode);
        }
        if self.skip_existing {
            config = config.with_overwrite(false);
        } else if self.overwrite {
            config = config.with_overwrite(true);
        }
        config
    }

    /// Applies the source flag given on the command line to `config`.
    pub fn source_config(&self, config: SourceConfig) -> SourceConfig {
        match &self.source_directory {
            Some(directory) => config.with_directory(directory),
            None => config,
        }
    }
}
