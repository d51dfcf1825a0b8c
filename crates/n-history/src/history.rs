//! Bounded, branch-pruning undo/redo over palettes.
//!
//! The history is a linear list of palettes plus a cursor pointing at the
//! active one. Moving the cursor back and forth is undo/redo; pushing a new
//! palette while the cursor is mid-list discards everything after it
//! (browser-history style, no branches).
//!
//! ```text
//! push A, B, C        [A, B, C]   cursor 2
//! undo                [A, B, C]   cursor 1
//! push D              [A, B, D]   cursor 2   (C discarded)
//! ```
//!
//! The list holds at most [`CAPACITY`] entries; pushing beyond that evicts
//! the oldest ones. Pushing a palette equal to the active one is a no-op, but
//! deleting an entry can leave two equal palettes side by side.

use n_color::Palette;
use thiserror::Error;

/// Maximum number of palettes kept in the history.
pub const CAPACITY: usize = 20;

/// Errors from index-addressed history operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// PaletteHistory
// ---------------------------------------------------------------------------

/// Linear undo/redo history of palettes.
///
/// `cursor` is `None` exactly when `entries` is empty; otherwise it is a valid
/// index into `entries`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteHistory {
    entries: Vec<Palette>,
    cursor: Option<usize>,
}

impl PaletteHistory {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Rebuild a history from persisted parts.
    ///
    /// Entries are kept in order, equal neighbours included. Empty palettes
    /// are dropped and the cursor is repaired the way [`delete`](Self::delete)
    /// would, then only the newest [`CAPACITY`] entries are kept. A cursor
    /// that no longer points inside the result falls back to the last entry.
    #[must_use]
    pub fn from_parts(entries: Vec<Palette>, cursor: Option<usize>) -> Self {
        let mut kept: Vec<Palette> = Vec::with_capacity(entries.len());
        let mut mapped = None;
        for (i, palette) in entries.into_iter().enumerate() {
            if cursor == Some(i) {
                mapped = Some(if palette.is_empty() {
                    kept.len().saturating_sub(1)
                } else {
                    kept.len()
                });
            }
            if !palette.is_empty() {
                kept.push(palette);
            }
        }

        // Evicted entries shift the stored cursor left.
        let evicted = kept.len().saturating_sub(CAPACITY);
        kept.drain(..evicted);

        let cursor = if kept.is_empty() {
            None
        } else {
            mapped
                .and_then(|c| c.checked_sub(evicted))
                .filter(|&c| c < kept.len())
                .or(Some(kept.len() - 1))
        };

        Self { entries: kept, cursor }
    }

    /// Append `palette` as the new active entry.
    ///
    /// Returns `false` (and changes nothing) when `palette` is empty or equal
    /// to the active entry. Otherwise entries after the cursor are discarded,
    /// the palette is appended, the oldest entries are evicted down to
    /// [`CAPACITY`], and the cursor moves to the new tail.
    pub fn push(&mut self, palette: Palette) -> bool {
        if palette.is_empty() || self.current() == Some(&palette) {
            return false;
        }

        // Discard the redo branch.
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        self.entries.push(palette);

        if self.entries.len() > CAPACITY {
            let excess = self.entries.len() - CAPACITY;
            self.entries.drain(..excess);
        }

        self.cursor = Some(self.entries.len() - 1);
        true
    }

    /// Step back to the previous palette.
    ///
    /// Returns `None` when already at the oldest entry (or empty).
    pub fn undo(&mut self) -> Option<&Palette> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1)
    }

    /// Step forward to the next palette.
    ///
    /// Returns `None` when already at the newest entry (or empty).
    pub fn redo(&mut self) -> Option<&Palette> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.entries.len())?;
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1)
    }

    /// Make the entry at `index` active.
    ///
    /// # Errors
    ///
    /// [`HistoryError::IndexOutOfRange`] when `index >= len`.
    pub fn select(&mut self, index: usize) -> Result<&Palette, HistoryError> {
        self.check_index(index)?;
        self.cursor = Some(index);
        Ok(&self.entries[index])
    }

    /// Remove the entry at `index` and repair the cursor.
    ///
    /// Deleting the active entry or one before it moves the cursor back one
    /// place (never below 0); deleting an entry after it leaves the cursor
    /// index alone. Returns the active palette afterwards, or `None` if the
    /// history is now empty.
    ///
    /// # Errors
    ///
    /// [`HistoryError::IndexOutOfRange`] when `index >= len`.
    pub fn delete(&mut self, index: usize) -> Result<Option<&Palette>, HistoryError> {
        self.check_index(index)?;
        self.entries.remove(index);

        self.cursor = match self.cursor {
            _ if self.entries.is_empty() => None,
            Some(cursor) if index <= cursor => Some(cursor.saturating_sub(1)),
            // Deleted after the cursor: index unchanged, still in bounds.
            other => other,
        };

        Ok(self.current())
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// The active palette.
    #[must_use]
    pub fn current(&self) -> Option<&Palette> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Index of the active palette, `None` when empty.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Palette] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    fn check_index(&self, index: usize) -> Result<(), HistoryError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
