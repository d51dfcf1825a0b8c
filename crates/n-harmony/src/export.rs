//! JSON and CSS renderings of a palette.
//!
//! Exporters only produce bytes and a suggested filename. Delivering them
//! (file, clipboard, download) is the caller's job.
//!
//! An empty palette renders to no bytes at all; [`export`] reports it as
//! `None` so callers can reject the request.

use std::fmt::Write as _;
use std::str::FromStr;

use n_color::Palette;
use serde::Serialize;

use crate::error::HarmonyError;

/// Output format for [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Css,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Css => "css",
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Css => "text/css",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Json, Self::Css]
    }
}

impl FromStr for ExportFormat {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|f| f.extension().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| HarmonyError::UnknownFormat(s.to_string()))
    }
}

/// Rendered export, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub format: ExportFormat,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct NamedColor {
    name: String,
    hex: String,
}

/// `color-palette-<unix-ms>.<ext>`.
#[must_use]
pub fn suggested_filename(format: ExportFormat, unix_ms: i64) -> String {
    format!("color-palette-{unix_ms}.{}", format.extension())
}

/// Render `palette` in `format`, named with the `unix_ms` timestamp.
///
/// Returns `Ok(None)` for an empty palette.
///
/// # Errors
///
/// Only JSON rendering can fail, and only if serialization itself fails.
pub fn export(
    palette: &Palette,
    format: ExportFormat,
    unix_ms: i64,
) -> Result<Option<Export>, HarmonyError> {
    if palette.is_empty() {
        return Ok(None);
    }
    let bytes = match format {
        ExportFormat::Json => to_json(palette)?,
        ExportFormat::Css => to_css(palette),
    };
    Ok(Some(Export {
        format,
        filename: suggested_filename(format, unix_ms),
        bytes,
    }))
}

/// Pretty-printed (2-space) array of `{"name": "Color N", "hex": ...}`.
///
/// # Errors
///
/// Propagates `serde_json` failures.
pub fn to_json(palette: &Palette) -> Result<Vec<u8>, HarmonyError> {
    if palette.is_empty() {
        return Ok(Vec::new());
    }
    let named: Vec<NamedColor> = palette
        .iter()
        .enumerate()
        .map(|(i, color)| NamedColor {
            name: format!("Color {}", i + 1),
            hex: color.to_hex(),
        })
        .collect();
    Ok(serde_json::to_vec_pretty(&named)?)
}

/// `:root` block of `--color-N` custom properties followed by usage
/// examples. The `--color-3` example is left out when there is no third
/// color.
#[must_use]
pub fn to_css(palette: &Palette) -> Vec<u8> {
    if palette.is_empty() {
        return Vec::new();
    }

    let mut css = String::from(":root {\n");
    for (i, color) in palette.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(css, "  --color-{}: {color};", i + 1);
    }
    css.push_str("}\n\n");

    css.push_str("/* Example usage */\n");
    css.push_str(".primary-bg { background-color: var(--color-1); }\n");
    if palette.len() >= 3 {
        css.push_str(".accent-color { color: var(--color-3); }\n");
    }

    css.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rgb() -> Palette {
        Palette::parse(["#ff0000", "#00ff00", "#0000ff"]).unwrap()
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn json_shape() {
        let json = text(to_json(&Palette::parse(["#FF0000", "#0f0"]).unwrap()).unwrap());
        assert_eq!(
            json,
            "[\n  {\n    \"name\": \"Color 1\",\n    \"hex\": \"#ff0000\"\n  },\n  \
             {\n    \"name\": \"Color 2\",\n    \"hex\": \"#00ff00\"\n  }\n]"
        );
    }

    #[test]
    fn json_parses_back() {
        let value: serde_json::Value = serde_json::from_slice(&to_json(&rgb()).unwrap()).unwrap();
        assert_eq!(value[2]["name"], "Color 3");
        assert_eq!(value[2]["hex"], "#0000ff");
    }

    #[test]
    fn css_full_palette() {
        let css = text(to_css(&rgb()));
        assert_eq!(
            css,
            ":root {\n  --color-1: #ff0000;\n  --color-2: #00ff00;\n  --color-3: #0000ff;\n}\n\n\
             /* Example usage */\n\
             .primary-bg { background-color: var(--color-1); }\n\
             .accent-color { color: var(--color-3); }\n"
        );
    }

    #[test]
    fn css_short_palette_skips_missing_reference() {
        let css = text(to_css(&Palette::parse(["#123456", "#abcdef"]).unwrap()));
        assert!(css.contains("--color-2: #abcdef;"));
        assert!(css.contains("var(--color-1)"));
        assert!(!css.contains("--color-3"));
    }

    #[test]
    fn empty_palette_produces_nothing() {
        let empty = Palette::default();
        assert!(to_json(&empty).unwrap().is_empty());
        assert!(to_css(&empty).is_empty());
        assert_eq!(export(&empty, ExportFormat::Css, 0).unwrap(), None);
    }

    #[test]
    fn export_names_file_by_timestamp() {
        let out = export(&rgb(), ExportFormat::Json, 1_700_000_000_123).unwrap().unwrap();
        assert_eq!(out.filename, "color-palette-1700000000123.json");
        assert_eq!(out.format.mime_type(), "application/json");
        let css = export(&rgb(), ExportFormat::Css, 42).unwrap().unwrap();
        assert_eq!(css.filename, "color-palette-42.css");
    }

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("css".parse::<ExportFormat>().unwrap(), ExportFormat::Css);
        assert!("scss".parse::<ExportFormat>().is_err());
    }
}
