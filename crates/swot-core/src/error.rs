//! Error types for swot-core

use thiserror::Error;

/// Result type alias using swot-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in swot-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Quiz not found
    #[error("Quiz not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payload could not be turned into or out of its persisted string form
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend rejected a write (quota exceeded)
    #[error("Storage capacity exceeded for key '{key}': {detail}")]
    StorageCapacity { key: String, detail: String },

    /// Expected chunk missing or chunk count inconsistent at load time
    #[error("Chunk integrity failure for key '{key}': {detail}")]
    ChunkIntegrity { key: String, detail: String },

    /// Incoming record lacks required content during reconciliation
    #[error("Invalid quiz record: {0}")]
    RecordValidation(String),
}
