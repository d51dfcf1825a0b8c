// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while parsing or editing colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not `#RGB` or `#RRGGBB` with hex digits only.
    #[error("invalid color format: {0:?} (expected #RGB or #RRGGBB)")]
    InvalidColorFormat(String),

    /// A palette position outside `[0, len)`.
    #[error("color index {index} out of range for a palette of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
