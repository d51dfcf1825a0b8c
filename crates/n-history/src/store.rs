//! Session-wide palette history service.
//!
//! [`PaletteHistoryStore`] wraps a [`PaletteHistory`] in a mutex and mirrors
//! it to a [`BlobStore`] after every mutation. Persistence runs while the
//! lock is held, so blobs are written in the same order as the mutations
//! that produced them.
//!
//! A failed write never rolls back the in-memory change. It comes back as the
//! `warning` of a [`Committed`] result and is logged. Until a later full write
//! succeeds, every mutation rewrites both blobs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use n_color::Palette;
use tracing::{debug, info, warn};

use crate::blob::{BlobStore, PersistenceError};
use crate::codec;
use crate::history::{HistoryError, PaletteHistory};

/// Blob key of the history entries.
pub const HISTORY_KEY: &str = "paletteHistory";

/// Blob key of the cursor position.
pub const CURSOR_KEY: &str = "paletteHistory.cursor";

/// Outcome of a mutation: its value plus any persistence failure.
#[derive(Debug)]
#[must_use]
pub struct Committed<T> {
    pub value: T,
    pub warning: Option<PersistenceError>,
}

impl<T> Committed<T> {
    const fn new(value: T, warning: Option<PersistenceError>) -> Self {
        Self { value, warning }
    }

    /// Whether the new state reached the blob store.
    pub const fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }
}

/// What a mutation changed, and therefore what must be written.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Dirty {
    Nothing,
    Cursor,
    All,
}

/// Palette history shared by one session.
pub struct PaletteHistoryStore {
    history: Mutex<PaletteHistory>,
    blobs: Arc<dyn BlobStore>,
    /// Set when the blobs may lag behind `history`. Only touched under the
    /// `history` lock.
    stale: AtomicBool,
}

impl PaletteHistoryStore {
    /// Load the persisted history from `blobs`.
    ///
    /// Missing, unreadable or malformed blobs yield an empty history. A
    /// missing or invalid cursor points at the newest entry.
    pub fn hydrate(blobs: Arc<dyn BlobStore>) -> Self {
        let entries = match blobs.load(HISTORY_KEY) {
            Ok(Some(bytes)) => codec::decode_history(&bytes).unwrap_or_else(|| {
                warn!(key = HISTORY_KEY, "discarding malformed palette history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = HISTORY_KEY, error = %e, "palette history unreadable, starting empty");
                Vec::new()
            }
        };

        let cursor = if entries.is_empty() {
            None
        } else {
            match blobs.load(CURSOR_KEY) {
                Ok(Some(bytes)) => codec::decode_cursor(&bytes),
                Ok(None) => None,
                Err(e) => {
                    warn!(key = CURSOR_KEY, error = %e, "history cursor unreadable");
                    None
                }
            }
        };

        let history = PaletteHistory::from_parts(entries, cursor);
        info!(
            entries = history.len(),
            cursor = ?history.current_index(),
            "palette history hydrated"
        );

        Self {
            history: Mutex::new(history),
            blobs,
            stale: AtomicBool::new(false),
        }
    }

    /// Start with an empty history, ignoring anything persisted.
    pub fn empty(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            history: Mutex::new(PaletteHistory::new()),
            blobs,
            stale: AtomicBool::new(false),
        }
    }

    /// Push `palette` as the active entry.
    ///
    /// The value is `false` when the push was a no-op (empty palette, or the
    /// same as the active one); nothing is persisted then.
    pub fn append(&self, palette: Palette) -> Committed<bool> {
        let mut history = self.lock();
        let pushed = history.push(palette);
        if pushed {
            debug!(len = history.len(), "palette appended to history");
        }
        let dirty = if pushed { Dirty::All } else { Dirty::Nothing };
        let warning = self.persist(&history, dirty);
        Committed::new(pushed, warning)
    }

    /// Step back; the value is the newly active palette, `None` at the start.
    pub fn undo(&self) -> Committed<Option<Palette>> {
        let mut history = self.lock();
        let moved = history.undo().cloned();
        self.cursor_moved(&history, moved)
    }

    /// Step forward; the value is the newly active palette, `None` at the end.
    pub fn redo(&self) -> Committed<Option<Palette>> {
        let mut history = self.lock();
        let moved = history.redo().cloned();
        self.cursor_moved(&history, moved)
    }

    /// Make the entry at `index` active.
    ///
    /// # Errors
    ///
    /// [`HistoryError::IndexOutOfRange`] when `index >= len`.
    pub fn select_at(&self, index: usize) -> Result<Committed<Palette>, HistoryError> {
        let mut history = self.lock();
        let before = history.current_index();
        let selected = history.select(index)?.clone();
        debug!(index, "history entry selected");
        let dirty = if before == Some(index) {
            Dirty::Nothing
        } else {
            Dirty::Cursor
        };
        let warning = self.persist(&history, dirty);
        Ok(Committed::new(selected, warning))
    }

    /// Remove the entry at `index`; the value is the palette active afterwards.
    ///
    /// # Errors
    ///
    /// [`HistoryError::IndexOutOfRange`] when `index >= len`.
    pub fn delete_at(&self, index: usize) -> Result<Committed<Option<Palette>>, HistoryError> {
        let mut history = self.lock();
        let active = history.delete(index)?.cloned();
        debug!(
            index,
            len = history.len(),
            cursor = ?history.current_index(),
            "history entry deleted"
        );
        let warning = self.persist(&history, Dirty::All);
        Ok(Committed::new(active, warning))
    }

    /// Drop every entry and the persisted blobs.
    pub fn clear(&self) -> Committed<()> {
        let mut history = self.lock();
        history.clear();
        debug!("palette history cleared");
        let warning = self.persist(&history, Dirty::All);
        Committed::new((), warning)
    }

    /// Copy of the whole history.
    #[must_use]
    pub fn snapshot(&self) -> PaletteHistory {
        self.lock().clone()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Palette> {
        self.lock().entries().to_vec()
    }

    #[must_use]
    pub fn current(&self) -> Option<Palette> {
        self.lock().current().cloned()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.lock().current_index()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every mutation leaves the history valid, so a poisoned lock still
    // guards consistent state.
    fn lock(&self) -> MutexGuard<'_, PaletteHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cursor_moved(
        &self,
        history: &PaletteHistory,
        moved: Option<Palette>,
    ) -> Committed<Option<Palette>> {
        let dirty = if moved.is_some() {
            debug!(cursor = ?history.current_index(), "history cursor moved");
            Dirty::Cursor
        } else {
            Dirty::Nothing
        };
        let warning = self.persist(history, dirty);
        Committed::new(moved, warning)
    }

    fn persist(&self, history: &PaletteHistory, dirty: Dirty) -> Option<PersistenceError> {
        // After a failed write the blobs may hold an older history, so any
        // call retries the full write.
        let dirty = if self.stale.load(Ordering::Relaxed) {
            Dirty::All
        } else {
            dirty
        };
        let result = match dirty {
            Dirty::Nothing => return None,
            Dirty::Cursor => self.write_cursor(history),
            Dirty::All => self.write_all(history),
        };
        self.stale.store(result.is_err(), Ordering::Relaxed);
        result.err().inspect(|e| {
            warn!(error = %e, "failed to persist palette history; keeping in-memory state");
        })
    }

    fn write_all(&self, history: &PaletteHistory) -> Result<(), PersistenceError> {
        if history.is_empty() {
            self.blobs.remove(HISTORY_KEY)?;
            return self.blobs.remove(CURSOR_KEY);
        }
        self.blobs.save(HISTORY_KEY, &codec::encode_history(history.entries())?)?;
        self.write_cursor(history)
    }

    fn write_cursor(&self, history: &PaletteHistory) -> Result<(), PersistenceError> {
        match history.current_index() {
            Some(cursor) => self.blobs.save(CURSOR_KEY, &codec::encode_cursor(cursor)?),
            None => self.blobs.remove(CURSOR_KEY),
        }
    }
}

impl std::fmt::Debug for PaletteHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteHistoryStore")
            .field("history", &*self.lock())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
