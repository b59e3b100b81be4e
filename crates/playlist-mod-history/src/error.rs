/// Error types for saving and loading playlist state.
use thiserror::Error;

/// Writing (or deleting) persisted state failed.
///
/// In-memory state is never touched when this is returned.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode playlist state")]
    Encode(#[source] serde_json::Error),
    #[error("storage backend failed for key `{key}`")]
    Backend {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// The stored record exists but is not a valid playlist state.
#[derive(Debug, Error)]
#[error("persisted playlist state under `{key}` is malformed")]
pub struct CorruptStateError {
    pub key: String,
    #[source]
    pub source: serde_json::Error,
}

/// Reading persisted state failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Corrupt(#[from] CorruptStateError),
}
