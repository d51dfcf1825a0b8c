//! Persisted history format.
//!
//! The history blob is a JSON array of palettes, each an array of lowercase
//! `#rrggbb` strings:
//!
//! ```json
//! [["#ff0000","#00ff00"],["#336699"]]
//! ```
//!
//! The cursor blob is a bare JSON integer. There is no version field; any
//! blob that does not decode cleanly is treated as absent.

use n_color::Palette;

use crate::blob::PersistenceError;

/// Serialize history entries.
///
/// # Errors
///
/// Propagates `serde_json` failures.
pub fn encode_history(entries: &[Palette]) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec(entries)?)
}

/// Parse history entries, or `None` if `bytes` is not a well-formed history.
///
/// A history containing an empty palette is malformed.
#[must_use]
pub fn decode_history(bytes: &[u8]) -> Option<Vec<Palette>> {
    let entries: Vec<Palette> = serde_json::from_slice(bytes).ok()?;
    if entries.iter().any(Palette::is_empty) {
        return None;
    }
    Some(entries)
}

/// Serialize the cursor position.
///
/// # Errors
///
/// Propagates `serde_json` failures.
pub fn encode_cursor(cursor: usize) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec(&cursor)?)
}

/// Parse a cursor position, or `None` if `bytes` is not a non-negative integer.
#[must_use]
pub fn decode_cursor(bytes: &[u8]) -> Option<usize> {
    serde_json::from_slice(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Palette> {
        vec![
            Palette::parse(["#FF0000", "#0f0"]).unwrap(),
            Palette::parse(["#336699"]).unwrap(),
        ]
    }

    #[test]
    fn history_shape() {
        let bytes = encode_history(&sample()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r##"[["#ff0000","#00ff00"],["#336699"]]"##
        );
    }

    #[test]
    fn history_decodes() {
        let decoded = decode_history(br##"[["#ff0000","#00ff00"],["#336699"]]"##);
        assert_eq!(decoded, Some(sample()));
        assert_eq!(decode_history(b"[]"), Some(Vec::new()));
    }

    #[test]
    fn malformed_history_is_absent() {
        let malformed: [&[u8]; 7] = [
            b"",
            b"not json",
            b"{\"entries\":[]}",
            br##"[["#ff0000"],"#00ff00"]"##,
            br##"[["#ff0000","blue"]]"##,
            br##"[["#ff0000"],[]]"##,
            b"[[1,2,3]]",
        ];
        for bad in malformed {
            assert_eq!(decode_history(bad), None, "{}", String::from_utf8_lossy(bad));
        }
    }

    #[test]
    fn cursor_codec() {
        assert_eq!(encode_cursor(7).unwrap(), b"7");
        assert_eq!(decode_cursor(b"3"), Some(3));
        assert_eq!(decode_cursor(b"-1"), None);
        assert_eq!(decode_cursor(b"\"2\""), None);
        assert_eq!(decode_cursor(b"1.5"), None);
    }
}
