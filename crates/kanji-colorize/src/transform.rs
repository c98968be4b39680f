//! Rewriting of parsed KanjiVG documents.
//!
//! A [`Transformer`] applies one [`RenderConfig`] to a [`Document`] in
//! place. The steps run in a fixed order:
//!
//! 1. colorize strokes or groups, or annotate classes in [`Mode::CssClass`]
//! 2. resize the document
//! 3. note the changes above the copyright notice (colored modes only)
//!
//! [`Mode::CssClass`]: crate::config::Mode::CssClass

mod classes;
mod colorize;
mod provenance;
mod resize;

pub use colorize::stroke_count;
pub use provenance::provenance_note;
pub use resize::{BASELINE_SIZE, scale_ratio, source_size};

use log::{debug, trace};

use kanji_colorize_core::color;
use kanji_colorize_markup::{Document, Element};

use crate::config::RenderConfig;

/// A pen stroke.
fn is_stroke(element: &Element) -> bool {
    element.name() == "path"
}

/// A stroke number label.
fn is_label(element: &Element) -> bool {
    element.name() == "text"
}

/// A group standing for a named component of the character.
fn is_structural_group(element: &Element) -> bool {
    element.name() == "g" && element.has_attribute("kvg:element")
}

/// Applies a [`RenderConfig`] to documents.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    config: &'a RenderConfig,
}

impl<'a> Transformer<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Rewrites `document` in place.
    pub fn apply(&self, document: &mut Document) {
        let config = self.config;
        match config.mode().color_mode() {
            Some(color_mode) => {
                let count = stroke_count(document.root());
                let colors = color::generate(count, color_mode, config.saturation(), config.value());
                trace!(strokes = count; "Generated stroke colors");

                let root = document.root_mut();
                if config.group_mode() {
                    colorize::color_groups(root, &colors);
                    let removed = root.remove_descendants(&is_label);
                    debug!(labels = removed; "Removed stroke numbers");
                } else {
                    colorize::color_strokes(root, &colors);
                }

                resize::resize(document.root_mut(), config.image_size());
                provenance::annotate(document, config);
            }
            None => {
                if config.group_mode() {
                    debug!("Group mode has no effect on class annotation");
                }
                classes::annotate(document, config.classes());
                resize::resize(document.root_mut(), config.image_size());
            }
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use kanji_colorize_markup::{Node, parse};

    use super::*;

    fn document_with_strokes(strokes: usize) -> Document {
        let paths: String = (0..strokes).map(|i| format!("<path d=\"M{i},0\"/>")).collect();
        let labels: String = (1..=strokes).map(|i| format!("<text>{i}</text>")).collect();
        parse(&format!(
            "<!-- Copyright (C) holder --><svg viewBox=\"0 0 109 109\"><g>{paths}</g><g>{labels}</g></svg>"
        ))
        .unwrap()
    }

    proptest! {
        #[test]
        fn prop_stroke_and_label_colors_match(strokes in 0usize..40, contrast in any::<bool>()) {
            let mode = if contrast { crate::config::Mode::Contrast } else { crate::config::Mode::Spectrum };
            let config = RenderConfig::default().with_mode(mode);
            let mut document = document_with_strokes(strokes);
            Transformer::new(&config).apply(&mut document);

            let color_of = |name: &str| -> Vec<Option<String>> {
                document
                    .root()
                    .descendants()
                    .filter(|e| e.name() == name)
                    .map(|e| e.style_property("stroke").map(str::to_string))
                    .collect()
            };
            let paths = color_of("path");
            prop_assert_eq!(paths.len(), strokes);
            prop_assert!(paths.iter().all(Option::is_some));
            prop_assert_eq!(paths, color_of("text"));
        }

        #[test]
        fn prop_note_added_once(strokes in 0usize..10) {
            let mut document = document_with_strokes(strokes);
            Transformer::new(&RenderConfig::default()).apply(&mut document);

            let notes = document
                .prolog()
                .iter()
                .filter(|node| matches!(node, Node::Comment(c) if c.contains("has been modified")))
                .count();
            prop_assert_eq!(notes, 1);
        }
    }
}
