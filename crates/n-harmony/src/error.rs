use thiserror::Error;

/// Errors from harmony lookup and palette export.
#[derive(Debug, Error)]
pub enum HarmonyError {
    #[error("unknown harmony {0:?}")]
    UnknownHarmony(String),

    #[error("unknown export format {0:?} (expected json or css)")]
    UnknownFormat(String),

    #[error("palette serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
