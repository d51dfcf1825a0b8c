// SPDX-License-Identifier: MIT
//
// Palettes — ordered runs of colors.
//
// Order is meaningful (it is the display order) and is never canonicalized.
// Two palettes are equal when they hold the same colors in the same order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ColorError;

/// An ordered sequence of colors.
///
/// Serializes as a plain JSON array of `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

/// One component of an HSL triple, used for single-channel edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HslChannel {
    Hue,
    Saturation,
    Lightness,
}

impl Palette {
    #[must_use]
    pub const fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// Parse every entry as a hex color.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed entry.
    pub fn parse<I, S>(hexes: I) -> Result<Self, ColorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        hexes
            .into_iter()
            .map(|h| Color::hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.0.iter()
    }

    /// Lowercase hex strings in palette order.
    #[must_use]
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.to_hex()).collect()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Color> {
        self.0
    }

    /// Copy of this palette with one color's hue, saturation or lightness
    /// set to `value`.
    ///
    /// The color is taken through whole-unit HSL, the channel replaced, and
    /// converted back, so untouched channels keep their rounded values.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::IndexOutOfRange`] when `index >= len`.
    pub fn adjusted(
        &self,
        index: usize,
        channel: HslChannel,
        value: f64,
    ) -> Result<Self, ColorError> {
        let color = self.get(index).ok_or(ColorError::IndexOutOfRange {
            index,
            len: self.len(),
        })?;

        let mut hsl = color.to_hsl();
        match channel {
            HslChannel::Hue => hsl.h = value,
            HslChannel::Saturation => hsl.s = value,
            HslChannel::Lightness => hsl.l = value,
        }

        let mut colors = self.0.clone();
        colors[index] = hsl.to_color();
        Ok(Self(colors))
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Palette {
    type Item = Color;
    type IntoIter = std::vec::IntoIter<Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{color}")?;
        }
        Ok(())
    }
}
