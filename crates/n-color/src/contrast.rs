// SPDX-License-Identifier: MIT
//
// WCAG 2.1 contrast checks between palette colors.
//
// Luminance is computed on linearized sRGB with the 0.03928 knee from the
// WCAG text; ratios land in [1, 21] regardless of argument order.

use crate::color::Color;

/// Minimum contrast ratio for normal-size text at level AA.
pub const WCAG_AA_NORMAL: f64 = 4.5;

/// Minimum contrast ratio for large text at level AA.
pub const WCAG_AA_LARGE: f64 = 3.0;

/// Linearize one sRGB channel (0.0–1.0).
#[inline]
#[must_use]
pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.039_28 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.1.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    let r_lin = srgb_to_linear(r);
    let g_lin = srgb_to_linear(g);
    let b_lin = srgb_to_linear(b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `ratio` is enough for normal text at level AA.
#[inline]
#[must_use]
pub fn meets_aa(ratio: f64) -> bool {
    ratio >= WCAG_AA_NORMAL
}

/// Whichever of black or white reads better on `background`.
#[must_use]
pub fn accessible_text_color(background: Color) -> Color {
    if contrast_ratio(Color::BLACK, background) >= contrast_ratio(Color::WHITE, background) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}
