// SPDX-License-Identifier: MIT
//
// n-color — the value layer of n-palette.
//
// Everything else in the workspace speaks in these types: a `Color` is three
// sRGB bytes that always print as lowercase `#rrggbb`, an `Hsl` is the
// cylindrical view used for hue-wheel arithmetic, and a `Palette` is an
// ordered run of colors compared by value. All functions here are pure and
// allocation-light, so they can be called from any thread.

pub mod color;
pub mod contrast;
pub mod error;
pub mod palette;

pub use color::{Color, Hsl, hex_to_hsl, hsl_to_hex, normalize_hue};
pub use error::ColorError;
pub use palette::{HslChannel, Palette};
