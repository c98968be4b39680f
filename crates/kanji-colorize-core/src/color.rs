//! Stroke color generation.
//!
//! This module provides the [`Color`] type used to paint strokes and stroke
//! numbers, and [`generate`], which produces the deterministic color sequence
//! for a diagram.
//!
//! # Overview
//!
//! - [`Color`]: An opaque RGB color rendered as `#rrggbb`.
//! - [`ColorMode`]: How hues are distributed over the strokes of a character.
//! - [`generate`]: Colors for `n` strokes followed by the same `n` colors again,
//!   so a stroke and its number label always match.
//!
//! # Example
//!
//! ```
//! use kanji_colorize_core::color::{ColorMode, generate};
//!
//! let colors = generate(2, ColorMode::Spectrum, 0.95, 0.75);
//! let hex: Vec<String> = colors.iter().map(ToString::to_string).collect();
//! assert_eq!(hex, ["#bf0909", "#09bfbf", "#bf0909", "#09bfbf"]);
//! ```

use std::fmt;

use color::Rgba8;
use log::trace;

/// Conjugate of the golden ratio; the hue step of [`ColorMode::Contrast`].
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618033988749895;

/// Distribution of hues over the strokes of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Hues progress evenly around the color wheel.
    ///
    /// Shows how a character is put together at a glance, but consecutive
    /// strokes get similar colors.
    #[default]
    Spectrum,

    /// Hues advance by the golden ratio conjugate.
    ///
    /// Maximizes contrast between consecutive strokes and yields the same
    /// sequence for every character.
    Contrast,
}

impl ColorMode {
    /// Returns the configuration name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Spectrum => "spectrum",
            ColorMode::Contrast => "contrast",
        }
    }

    /// Hue of stroke `index` out of `count` strokes.
    ///
    /// Contrast hues are not wrapped here; [`Color::from_hsv`] reduces any
    /// hue modulo one.
    fn hue(self, index: usize, count: usize) -> f64 {
        match self {
            ColorMode::Spectrum => index as f64 / count as f64,
            ColorMode::Contrast => index as f64 * GOLDEN_RATIO_CONJUGATE,
        }
    }
}

/// An opaque RGB color.
///
/// Displays as a lowercase `#rrggbb` string, the form written into stroke
/// styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(Rgba8);

impl Color {
    fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba8 {
            r,
            g,
            b,
            a: u8::MAX,
        })
    }

    /// Converts hue, saturation and value, each in `[0, 1]`, to RGB.
    ///
    /// Hues outside `[0, 1)` wrap around. Every channel is scaled to
    /// `[0, 255]` and truncated, not rounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanji_colorize_core::Color;
    ///
    /// assert_eq!(Color::from_hsv(0.0, 0.0, 0.0).to_string(), "#000000");
    /// assert_eq!(Color::from_hsv(2.0 / 3.0, 1.0, 1.0).to_string(), "#0000ff");
    /// assert_eq!(Color::from_hsv(0.5, 0.95, 0.75).to_string(), "#09bfbf");
    /// ```
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let (r, g, b) = hsv_to_rgb(hue, saturation, value);
        Self::from_rgb8(channel_to_u8(r), channel_to_u8(g), channel_to_u8(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.0.to_u8_array();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Generates the color sequence for a character with `count` strokes.
///
/// Returns `2 * count` colors: one per stroke in drawing order, followed by
/// the same colors again for the stroke-number labels. A count of zero
/// yields an empty sequence.
///
/// # Arguments
///
/// * `count` - Number of strokes in the diagram.
/// * `mode` - Hue distribution.
/// * `saturation` - 0 is white/gray/black, 1 is fully colorful.
/// * `value` - 0 is black, 1 is fully bright.
///
/// # Examples
///
/// ```
/// use kanji_colorize_core::color::{ColorMode, generate};
///
/// let colors = generate(3, ColorMode::Contrast, 1.0, 1.0);
/// let hex: Vec<String> = colors.iter().map(ToString::to_string).collect();
/// assert_eq!(
///     hex,
///     ["#ff0000", "#004aff", "#94ff00", "#ff0000", "#004aff", "#94ff00"]
/// );
/// ```
pub fn generate(count: usize, mode: ColorMode, saturation: f64, value: f64) -> Vec<Color> {
    let strokes: Vec<Color> = (0..count)
        .map(|index| Color::from_hsv(mode.hue(index, count), saturation, value))
        .collect();
    trace!(count = count, mode = mode.as_str(); "Generated stroke colors");

    let mut colors = Vec::with_capacity(strokes.len() * 2);
    colors.extend_from_slice(&strokes);
    colors.extend_from_slice(&strokes);
    colors
}

/// Six-sector HSV to RGB conversion on unit-range channels.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

fn channel_to_u8(channel: f64) -> u8 {
    // `as` saturates and truncates toward zero
    (channel * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(colors: &[Color]) -> Vec<String> {
        colors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_hsv_fixed_points() {
        assert_eq!(Color::from_hsv(0.0, 0.0, 0.0).to_string(), "#000000");
        assert_eq!(Color::from_hsv(2.0 / 3.0, 1.0, 1.0).to_string(), "#0000ff");
        assert_eq!(Color::from_hsv(0.5, 0.95, 0.75).to_string(), "#09bfbf");
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0).to_string(), "#ff0000");
    }

    #[test]
    fn test_hsv_truncates_channels() {
        // 0.75 * 0.05 * 255 = 9.5625 must become 9, not 10
        assert_eq!(Color::from_hsv(0.0, 0.95, 0.75).to_string(), "#bf0909");
    }

    #[test]
    fn test_hsv_wraps_hue() {
        assert_eq!(Color::from_hsv(1.0, 1.0, 1.0), Color::from_hsv(0.0, 1.0, 1.0));
        assert_eq!(
            Color::from_hsv(1.5, 0.95, 0.75),
            Color::from_hsv(0.5, 0.95, 0.75)
        );
    }

    #[test]
    fn test_spectrum_sequence() {
        let colors = generate(2, ColorMode::Spectrum, 0.95, 0.75);
        assert_eq!(hex(&colors), ["#bf0909", "#09bfbf", "#bf0909", "#09bfbf"]);
    }

    #[test]
    fn test_contrast_sequence() {
        let colors = generate(3, ColorMode::Contrast, 1.0, 1.0);
        assert_eq!(
            hex(&colors),
            ["#ff0000", "#004aff", "#94ff00", "#ff0000", "#004aff", "#94ff00"]
        );
    }

    #[test]
    fn test_contrast_prefix_is_stable() {
        let three = generate(3, ColorMode::Contrast, 1.0, 1.0);
        let four = generate(4, ColorMode::Contrast, 1.0, 1.0);
        assert_eq!(three[..3], four[..3]);
    }

    #[test]
    fn test_spectrum_depends_on_count() {
        let two = generate(2, ColorMode::Spectrum, 1.0, 1.0);
        let three = generate(3, ColorMode::Spectrum, 1.0, 1.0);
        assert_eq!(two[0], three[0]);
        assert_ne!(two[1], three[1]);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(generate(0, ColorMode::Spectrum, 0.95, 0.75).is_empty());
        assert!(generate(0, ColorMode::Contrast, 0.95, 0.75).is_empty());
    }

    #[test]
    fn test_color_is_opaque_rgba8() {
        let color = Color::from_hsv(0.0, 0.95, 0.75);
        assert_eq!(color.0.to_u8_array(), [0xbf, 0x09, 0x09, 0xff]);
        assert_eq!(ColorMode::default(), ColorMode::Spectrum);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn color_mode() -> impl Strategy<Value = ColorMode> {
        prop_oneof![Just(ColorMode::Spectrum), Just(ColorMode::Contrast)]
    }

    proptest! {
        #[test]
        fn prop_sequence_repeats_once(
            count in 0usize..200,
            mode in color_mode(),
            saturation in 0.0f64..=1.0,
            value in 0.0f64..=1.0,
        ) {
            let colors = generate(count, mode, saturation, value);
            prop_assert_eq!(colors.len(), count * 2);
            prop_assert_eq!(&colors[..count], &colors[count..]);
        }

        #[test]
        fn prop_spectrum_hues_are_evenly_spaced(count in 1usize..500, index in 0usize..500) {
            let index = index % count;
            let hue = ColorMode::Spectrum.hue(index, count);
            prop_assert!(hue >= 0.0 && hue < 1.0);
            prop_assert!(approx_eq!(f64, hue * count as f64, index as f64, epsilon = 1e-9));
        }

        #[test]
        fn prop_zero_saturation_is_gray(hue in 0.0f64..10.0, value in 0.0f64..=1.0) {
            let Rgba8 { r, g, b, a } = Color::from_hsv(hue, 0.0, value).0;
            prop_assert_eq!(r, g);
            prop_assert_eq!(g, b);
            prop_assert_eq!(a, u8::MAX);
        }
    }
}
