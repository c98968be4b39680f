//! Resizing of diagrams.
//!
//! KanjiVG draws in a 109 unit square. A pixel size rewrites the root
//! dimensions and scales the stroke and stroke number wrappers so their
//! coordinates still fill the new viewBox.

use log::debug;

use kanji_colorize_markup::Element;

use crate::config::ImageSize;

/// Coordinate size of KanjiVG drawings.
pub const BASELINE_SIZE: f64 = 109.0;

const SCALE: &str = "scale(";

/// Size of the coordinate system of `root`.
///
/// Taken from the viewBox width, else a numeric `width`, else
/// [`BASELINE_SIZE`].
pub fn source_size(root: &Element) -> f64 {
    root.attribute("viewBox")
        .and_then(viewbox_width)
        .or_else(|| root.attribute("width").and_then(|w| w.trim().parse().ok()))
        .filter(|size: &f64| size.is_finite() && *size > 0.0)
        .unwrap_or(BASELINE_SIZE)
}

/// Scale factor from `source` units to `target` pixels.
pub fn scale_ratio(target: u32, source: f64) -> f64 {
    f64::from(target) / source
}

fn viewbox_width(viewbox: &str) -> Option<f64> {
    viewbox
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .nth(2)?
        .parse()
        .ok()
}

/// The `g` wrappers around all strokes or all stroke numbers.
fn is_stroke_wrapper(element: &Element) -> bool {
    element.name() == "g" && element.id().is_some_and(|id| id.starts_with("kvg:Stroke"))
}

pub(super) fn resize(root: &mut Element, size: ImageSize) {
    let source = source_size(root);
    match size {
        ImageSize::Pixels(pixels) => {
            let ratio = scale_ratio(pixels, source);
            root.set_attribute("width", pixels.to_string());
            root.set_attribute("height", pixels.to_string());
            root.set_attribute("viewBox", format!("0 0 {pixels} {pixels}"));

            let wrappers = root.find_paths(is_stroke_wrapper);
            for path in &wrappers {
                if let Some(wrapper) = root.get_mut(path) {
                    let transform = compose_scale(wrapper.attribute("transform"), ratio);
                    wrapper.set_attribute("transform", transform);
                }
            }
            debug!(size = pixels, ratio = ratio, wrappers = wrappers.len(); "Resized diagram");
        }
        ImageSize::Relative => {
            if !root.has_attribute("viewBox") {
                root.set_attribute("viewBox", format!("0 0 {source} {source}"));
            }
            root.set_attribute("width", "100%");
            root.set_attribute("height", "100%");
            debug!("Resized diagram to its container");
        }
    }
}

/// Multiplies an existing `scale(...)` by `ratio`, or prepends one.
fn compose_scale(transform: Option<&str>, ratio: f64) -> String {
    let transform = transform.unwrap_or_default().trim();
    if let Some((before, sx, sy, after)) = split_scale(transform) {
        return format!("{before}{SCALE}{:?},{:?}){after}", sx * ratio, sy * ratio);
    }
    if transform.is_empty() {
        format!("{SCALE}{ratio:?},{ratio:?})")
    } else {
        format!("{SCALE}{ratio:?},{ratio:?}) {transform}")
    }
}

/// Splits `transform` around its first `scale(sx[,sy])`.
fn split_scale(transform: &str) -> Option<(&str, f64, f64, &str)> {
    let start = transform.find(SCALE)?;
    let args_start = start + SCALE.len();
    let args_len = transform[args_start..].find(')')?;
    let args: Vec<f64> = transform[args_start..args_start + args_len]
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|arg| !arg.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    let (sx, sy) = match args.as_slice() {
        [s] => (*s, *s),
        [sx, sy] => (*sx, *sy),
        _ => return None,
    };
    Some((
        &transform[..start],
        sx,
        sy,
        &transform[args_start + args_len + 1..],
    ))
}
