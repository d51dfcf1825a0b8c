//! n-history — palette undo/redo history with persistence.
//!
//! [`PaletteHistory`] is the plain state machine (entries + cursor).
//! [`PaletteHistoryStore`] is the session service around it: it serializes
//! access behind a mutex and mirrors each mutation to a [`BlobStore`].

pub mod blob;
pub mod codec;
pub mod history;
pub mod store;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, PersistenceError};
pub use history::{CAPACITY, HistoryError, PaletteHistory};
pub use store::{CURSOR_KEY, Committed, HISTORY_KEY, PaletteHistoryStore};
