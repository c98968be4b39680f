//! Stroke and group coloring.
//!
//! Colors are generated up front for the whole document and handed out by
//! position: the i-th stroke and the i-th stroke number get the i-th color.

use log::{debug, warn};

use kanji_colorize_core::Color;
use kanji_colorize_markup::{Element, ElementPath, Visit};

use super::{is_label, is_stroke, is_structural_group};

/// Number of strokes in the tree below `root`.
pub fn stroke_count(root: &Element) -> usize {
    root.descendants().filter(|e| is_stroke(e)).count()
}

/// Paints stroke `i` and label `i` with `colors[i]` and `colors[n + i]`.
///
/// `colors` must come from the generator called with this tree's stroke
/// count. Extra labels are left unpainted.
pub(super) fn color_strokes(root: &mut Element, colors: &[Color]) {
    let strokes = root.find_paths(is_stroke);
    let labels = root.find_paths(is_label);
    let (stroke_colors, label_colors) = colors.split_at(strokes.len().min(colors.len()));

    if !labels.is_empty() && labels.len() != strokes.len() {
        warn!(
            strokes = strokes.len(),
            labels = labels.len();
            "Stroke number count does not match stroke count"
        );
    }

    paint(root, &strokes, stroke_colors);
    paint(root, &labels, label_colors);
}

/// Paints the outermost structural groups inside the anchor group.
///
/// The anchor, the first structural group in document order, stands for the
/// whole character and stays unpainted. Groups nested in a painted group are
/// skipped. Returns the number of groups painted.
pub(super) fn color_groups(root: &mut Element, colors: &[Color]) -> usize {
    let Some(anchor) = root.find_paths(is_structural_group).into_iter().next() else {
        warn!("No structural group found, nothing to color");
        return 0;
    };

    let mut groups: Vec<ElementPath> = Vec::new();
    root.walk(|path, element| {
        if path.is_inside(&anchor) && is_structural_group(element) {
            groups.push(path.clone());
            Visit::Skip
        } else {
            Visit::Descend
        }
    });
    debug!(groups = groups.len(); "Coloring structural groups");

    paint(root, &groups, colors)
}

fn paint(root: &mut Element, paths: &[ElementPath], colors: &[Color]) -> usize {
    let mut painted = 0;
    for (path, color) in paths.iter().zip(colors) {
        if let Some(element) = root.get_mut(path) {
            element.set_style_property("stroke", &color.to_string());
            painted += 1;
        }
    }
    painted
}
