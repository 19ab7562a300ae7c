//! Persistence backends for batch output
//!
//! Records are keyed on transaction signature and inserted with
//! ignore-on-conflict semantics, so re-running a batch is idempotent.

pub mod jsonl_store;
pub mod pragmas;
pub mod sqlite_store;

pub use jsonl_store::JsonlStore;
pub use sqlite_store::SqliteStore;

use crate::extractor::BatchOutput;
use async_trait::async_trait;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Database(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait StoreBackend: Send {
    /// Insert one batch's collections
    async fn insert_batch(&mut self, batch: &BatchOutput) -> Result<(), StoreError>;

    /// Flush pending writes to storage
    async fn flush(&mut self) -> Result<(), StoreError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
