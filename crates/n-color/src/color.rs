// SPDX-License-Identifier: MIT
//
// n-color color system — sRGB hex values with an HSL view.
//
// Single-character variable names (r, g, b, h, s, l, c, x, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference formulas.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   "#rgb" / "#rrggbb"  →  Color (3 × u8)  ↔  Hsl (degrees, percent, percent)
//
// `Color → Hsl` rounds every component to a whole unit (degree or percent),
// which is the quantization grain the rest of the workspace relies on.
// `Hsl → Color` accepts fractional input so jittered harmonies keep their
// sub-percent variation until the final byte rounding.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ColorError;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque sRGB color, one byte per channel.
///
/// Parsed from `#RGB` or `#RRGGBB` (either case) and always rendered as
/// lowercase `#rrggbb`. Equality is exact channel equality.
///
/// # Examples
///
/// ```
/// use n_color::Color;
///
/// let orange = Color::hex("#F80").unwrap();
/// assert_eq!(orange.to_hex(), "#ff8800");
///
/// let hsl = orange.to_hsl();
/// assert_eq!((hsl.h, hsl.s, hsl.l), (32.0, 100.0, 50.0));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from 8-bit channel values.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from the low 24 bits of `value` (`0xRRGGBB`).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u24(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Parse `#RGB` or `#RRGGBB`. The leading `#` is required.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] for any other length or
    /// for non-hex digits. Malformed input is never coerced to a default.
    pub fn hex(s: &str) -> Result<Self, ColorError> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidColorFormat(s.to_string()))
    }

    /// Draw a uniformly random 24-bit color.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_u24(rng.random_range(0..=0x00ff_ffff))
    }

    /// Build a color from HSL components (hue in degrees, saturation and
    /// lightness in percent).
    ///
    /// Hue is wrapped into `[0, 360)`; saturation and lightness are clamped
    /// to `[0, 100]`.
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = normalize_hue(h);
        let s = s.clamp(0.0, 100.0) / 100.0;
        let l = l.clamp(0.0, 100.0) / 100.0;

        let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match sextant(h) {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgb(to_u8(r + m), to_u8(g + m), to_u8(b + m))
    }

    /// Convert to HSL with every component rounded to a whole unit.
    ///
    /// Hue is in `[0, 360)`, saturation and lightness in `[0, 100]`.
    /// Achromatic colors (all channels equal) report hue 0 and saturation 0.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);

        let (r, g, b) = self.to_srgb();
        let hi = f64::from(max) / 255.0;
        let lo = f64::from(min) / 255.0;
        let delta = hi - lo;

        let h = if max == min {
            0.0
        } else if max == self.r {
            ((g - b) / delta) % 6.0
        } else if max == self.g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let l = (hi + lo) / 2.0;
        let s = if max == min {
            0.0
        } else {
            delta / (1.0 - 2.0f64.mul_add(l, -1.0).abs())
        };

        Hsl {
            h: normalize_hue((h * 60.0).round()),
            s: (s * 100.0).round().clamp(0.0, 100.0),
            l: (l * 100.0).round().clamp(0.0, 100.0),
        }
    }

    /// Channels as sRGB values in `[0.0, 1.0]`.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, e.g. `rgb(255, 128, 0)`.
    #[must_use]
    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::hex(&raw).map_err(de::Error::custom)
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// Hue (degrees), saturation (percent), lightness (percent).
///
/// Values produced by [`Color::to_hsl`] are whole numbers. Values built by
/// callers may be fractional; [`Hsl::to_color`] normalizes and clamps them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Quantize to an sRGB color.
    #[inline]
    #[must_use]
    pub fn to_color(self) -> Color {
        Color::from_hsl(self.h, self.s, self.l)
    }

    /// Rotate the hue by `degrees`, wrapping around the wheel.
    #[inline]
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.0}, {:.0}%, {:.0}%)", self.h, self.s, self.l)
    }
}

// ─── Free-function API ───────────────────────────────────────────────────────

/// Parse a hex color and convert it to whole-unit HSL.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `hex` is malformed.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Color::hex(hex).map(Color::to_hsl)
}

/// Convert HSL components to a lowercase `#rrggbb` string.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Color::from_hsl(h, s, l).to_hex()
}

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // `abs` folds -0.0; the bound catches tiny negatives that round up to 360.
    if h >= 360.0 { 0.0 } else { h.abs() }
}

/// Index of the 60° slice of the wheel that `h` falls in.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sextant(h: f64) -> u8 {
    (h / 60.0).floor().clamp(0.0, 5.0) as u8
}

/// Convert a float (0.0–1.0) to a u8 (0–255), rounding half up.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let digits = s.strip_prefix('#')?.as_bytes();

    match digits.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(digits[0])?;
            let g = parse_hex_digit(digits[1])?;
            let b = parse_hex_digit(digits[2])?;
            Some(Color::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&digits[0..2])?;
            let g = parse_hex_byte(&digits[2..4])?;
            let b = parse_hex_byte(&digits[4..6])?;
            Some(Color::rgb(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
