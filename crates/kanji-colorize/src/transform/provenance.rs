//! Modification note in the copyright comment.
//!
//! KanjiVG is licensed CC BY-SA 3.0, so colored files say how they were
//! changed. The note goes right before the original copyright line.

use log::warn;

use kanji_colorize_markup::Document;

use crate::config::RenderConfig;

/// Start of the copyright line in KanjiVG files.
pub const COPYRIGHT_MARKER: &str = "Copyright (C)";

/// The note recording the settings a file was produced with.
pub fn provenance_note(config: &RenderConfig) -> String {
    format!(
        "This file has been modified from the original version by kanji-colorize
(available at https://github.com/cayennes/kanji-colorize) with these
settings:
    mode: {mode}
    group mode: {group_mode}
    saturation: {saturation:?}
    value: {value:?}
    image_size: {image_size}
It remains under a Creative Commons-Attribution-Share Alike 3.0 License.

The original SVG has the following copyright:

",
        mode = config.mode(),
        group_mode = if config.group_mode() { "on" } else { "off" },
        saturation = config.saturation(),
        value = config.value(),
        image_size = config.image_size(),
    )
}

/// Inserts the note before the first copyright line of any comment.
///
/// Returns `false`, leaving the document untouched, when there is no
/// copyright line.
pub(super) fn annotate(document: &mut Document, config: &RenderConfig) -> bool {
    for comment in document.comments_mut() {
        if let Some(index) = comment.find(COPYRIGHT_MARKER) {
            comment.insert_str(index, &provenance_note(config));
            return true;
        }
    }

    warn!(marker = COPYRIGHT_MARKER; "No copyright notice found, modification note not added");
    false
}
