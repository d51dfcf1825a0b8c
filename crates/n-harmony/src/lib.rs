//! # n-harmony — color harmony engine
//!
//! Builds palettes from a single seed color by walking the hue wheel, and
//! serializes finished palettes for export.
//!
//! # Architecture
//!
//! ```text
//! seed Color + HarmonyKind (+ rng for jittered kinds)
//!     │
//!     ▼
//! n_color:    Color → Hsl (whole degrees / percents)
//!     │
//!     ▼
//! harmony.rs: hue offsets mod 360, s/l variants, clamping
//!     │
//!     ▼
//! n_color:    Hsl → Color, collected into a Palette
//!     │
//!     ▼
//! export.rs:  Palette → JSON / CSS bytes + suggested filename
//! ```
//!
//! Everything here is a pure function of its inputs. The only state is the
//! caller-supplied random source used by analogous jitter and "surprise me".

// Mathematical code uses small integer-to-float casts (loop indices, steps).
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod error;
pub mod export;
pub mod harmony;

pub use error::HarmonyError;
pub use export::{Export, ExportFormat};
pub use harmony::{HarmonyKind, random_palette};
