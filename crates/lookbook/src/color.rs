//! Color conversion from Figma's sRGB records.
//!
//! Figma stores colors as floating point channels in `[0, 1]`. Stylesheets get
//! them as OKLCH, which is perceptually uniform; the distributed palette gets
//! them as hex.

use serde::{Deserialize, Serialize};

/// An sRGB color with channels in `[0, 1]`.
///
/// Alpha is optional because Figma omits it for opaque `RGB` values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Rgba {
    /// Creates an opaque color without an alpha channel.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Creates a color with an explicit alpha channel.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }
}

/// A color in the OKLCH cylindrical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
}

/// Below this chroma the hue is noise and is forced to zero.
const ACHROMATIC_CHROMA: f64 = 0.0001;

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts an sRGB color to OKLCH, ignoring alpha.
pub fn oklch_of(color: &Rgba) -> Oklch {
    let r = srgb_to_linear(color.r);
    let g = srgb_to_linear(color.g);
    let b = srgb_to_linear(color.b);

    // Linear sRGB to LMS
    let l = 0.412165612 * r + 0.536275208 * g + 0.0514575653 * b;
    let m = 0.211859107 * r + 0.6807189584 * g + 0.107406579 * b;
    let s = 0.0883097947 * r + 0.2818474174 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // LMS to OKLAB
    let lightness = 0.2104542553 * l_ + 0.793617785 * m_ - 0.0040720468 * s_;
    let a = 1.9779984951 * l_ - 2.428592205 * m_ + 0.4505937099 * s_;
    let b = 0.0259040371 * l_ + 0.7827717662 * m_ - 0.808675766 * s_;

    let chroma = (a * a + b * b).sqrt();
    let mut hue = b.atan2(a).to_degrees();
    if hue < 0.0 {
        hue += 360.0;
    }
    if hue >= 360.0 {
        hue -= 360.0;
    }
    if chroma < ACHROMATIC_CHROMA {
        hue = 0.0;
    }

    Oklch {
        l: lightness,
        c: chroma,
        h: hue,
    }
}

/// Formats a color as a CSS `oklch()` value.
///
/// Components are written at full precision. The alpha segment is only
/// present when alpha is set and isn't exactly 1.
///
/// # Example
///
/// ```rust
/// use lookbook::{to_oklch, Rgba};
///
/// assert_eq!(to_oklch(&Rgba::rgb(0.0, 0.0, 0.0)), "oklch(0 0 0)");
/// assert!(to_oklch(&Rgba::rgba(1.0, 0.0, 0.0, 0.5)).ends_with(" / 0.5)"));
/// ```
pub fn to_oklch(color: &Rgba) -> String {
    let Oklch { l, c, h } = oklch_of(color);
    match color.a {
        Some(alpha) if alpha != 1.0 => format!("oklch({} {} {} / {})", l, c, h, alpha),
        _ => format!("oklch({} {} {})", l, c, h),
    }
}

/// Formats a color as `#rrggbb`, or `#rrggbbaa` when it is translucent.
///
/// # Example
///
/// ```rust
/// use lookbook::{to_hex, Rgba};
///
/// assert_eq!(to_hex(&Rgba::rgb(1.0, 0.0, 0.0)), "#ff0000");
/// assert_eq!(to_hex(&Rgba::rgba(0.0, 0.0, 0.0, 0.5)), "#00000080");
/// ```
pub fn to_hex(color: &Rgba) -> String {
    let channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    let rgb = format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.r),
        channel(color.g),
        channel(color.b)
    );
    match color.a {
        Some(alpha) if alpha < 1.0 => format!("{}{:02x}", rgb, channel(alpha)),
        _ => rgb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_white_is_full_lightness() {
        let oklch = oklch_of(&Rgba::rgba(1.0, 1.0, 1.0, 1.0));
        assert!(close(oklch.l, 1.0), "lightness was {}", oklch.l);
        assert!(oklch.c < ACHROMATIC_CHROMA);
        assert_eq!(oklch.h, 0.0);
    }

    #[test]
    fn test_black_is_zero() {
        let oklch = oklch_of(&Rgba::rgba(0.0, 0.0, 0.0, 1.0));
        assert!(close(oklch.l, 0.0));
        assert!(close(oklch.c, 0.0));
        assert_eq!(oklch.h, 0.0);
    }

    #[test]
    fn test_red_hue() {
        let oklch = oklch_of(&Rgba::rgb(1.0, 0.0, 0.0));
        assert!((oklch.l - 0.628).abs() < 0.001, "lightness was {}", oklch.l);
        assert!((oklch.c - 0.2577).abs() < 0.001, "chroma was {}", oklch.c);
        assert!((oklch.h - 29.23).abs() < 0.1, "hue was {}", oklch.h);
    }

    #[test]
    fn test_blue_hue_is_normalized_positive() {
        let oklch = oklch_of(&Rgba::rgb(0.0, 0.0, 1.0));
        assert!(oklch.h > 180.0 && oklch.h < 360.0, "hue was {}", oklch.h);
    }

    #[test]
    fn test_alpha_segment() {
        let half = to_oklch(&Rgba::rgba(0.2, 0.4, 0.6, 0.5));
        assert!(half.starts_with("oklch("));
        assert!(half.ends_with(" / 0.5)"), "got {}", half);

        let opaque = to_oklch(&Rgba::rgba(0.2, 0.4, 0.6, 1.0));
        assert!(!opaque.contains('/'));

        let missing = to_oklch(&Rgba::rgb(0.2, 0.4, 0.6));
        assert_eq!(opaque, missing);
    }

    #[test]
    fn test_hex_opaque_and_translucent() {
        assert_eq!(to_hex(&Rgba::rgb(1.0, 1.0, 1.0)), "#ffffff");
        assert_eq!(to_hex(&Rgba::rgba(0.0, 0.478, 0.694, 1.0)), "#007ab1");
        assert_eq!(to_hex(&Rgba::rgba(1.0, 0.0, 0.0, 0.0)), "#ff000000");
    }
}
