//! CLI logic for the kanji-colorize tool.
//!
//! This module loads the configuration, layers the command-line flags over
//! it and writes the colored diagrams.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Switch};

use log::info;

use kanji_colorize::{
    ColorizeError, Colorizer,
    batch::{BatchReport, Selection},
    kanjivg::KanjiVg,
};

/// Run the kanji-colorize CLI application
///
/// This function colorizes the selected characters from the KanjiVG
/// directory and writes the results to the output directory. Characters
/// without data or with malformed files are recorded in the returned report
/// rather than stopping the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ColorizeError` for:
/// - Configuration loading errors
/// - Invalid settings
/// - A missing KanjiVG directory
/// - File I/O errors
pub fn run(args: &Args) -> Result<BatchReport, ColorizeError> {
    let (render, output, source) = config::load_config(args.config.as_ref())?.into_parts();
    let render = args.render_config(render);
    let output = args.output_config(output);
    let source = args.source_config(source);

    let colorizer = Colorizer::new(render)?;
    let source = KanjiVg::from_config(&source)?;
    let selection = match &args.characters {
        Some(list) => Selection::parse(list),
        None => Selection::default(),
    };

    info!(
        source = source.directory().display().to_string(),
        output = output.directory().display().to_string();
        "Processing characters"
    );

    let report = colorizer.write_all(&source, &selection, &output)?;

    info!(report:% = report; "Diagrams exported");

    Ok(report)
}
