//! The record store: one collection of pet record documents.
//!
//! # Design
//! The API holds an `Arc<dyn RecordStore>` handed to it at startup, so the
//! backend is chosen by configuration and tests can inject their own. Both
//! backends share the `Collection` bookkeeping; they differ only in whether a
//! mutation is flushed to disk before it is acknowledged.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StoreKind;
use crate::record::{PetRecord, RecordInput};

mod collection;
mod file;
mod memory;

pub use collection::Collection;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Shared handle to the process-wide store.
pub type SharedStore = Arc<dyn RecordStore>;

/// Why a store operation did not succeed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// One or more fields failed coercion or a required field was missing.
    #[error("PetRecord validation failed: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    #[error("pet record not found")]
    NotFound,

    /// The backing storage could not be read or written, or is closed.
    #[error("record store unavailable: {0}")]
    StorageUnavailable(String),
}

impl StoreError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::ValidationFailed(_) => "validation_failed",
            StoreError::NotFound => "not_found",
            StoreError::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::StorageUnavailable(err.to_string())
    }
}

/// Operations the record API needs from a document store.
///
/// Ids arrive as raw path segments; the store casts them and reports a
/// malformed id as `ValidationFailed(["_id"])`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Validate and insert a new record, assigning its id.
    async fn insert(&self, input: RecordInput) -> Result<PetRecord, StoreError>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<PetRecord>, StoreError>;

    async fn find(&self, id: &str) -> Result<Option<PetRecord>, StoreError>;

    /// Overwrite all mutable fields. Returns the previous document, or `None`
    /// if no record matched (in which case nothing is written).
    async fn replace(&self, id: &str, input: RecordInput)
        -> Result<Option<PetRecord>, StoreError>;

    /// Returns the removed document, or `None` if no record matched.
    async fn remove(&self, id: &str) -> Result<Option<PetRecord>, StoreError>;

    /// Release the backing storage. Later calls fail with `StorageUnavailable`.
    async fn close(&self) -> Result<(), StoreError>;
}

/// Open the store selected by configuration.
pub async fn open(kind: &StoreKind) -> Result<SharedStore, StoreError> {
    match kind {
        StoreKind::Memory => {
            tracing::info!("using in-memory record store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::File(path) => {
            let store = FileStore::open(path).await?;
            tracing::info!(path = %path.display(), records = store.len().await, "opened record file");
            Ok(Arc::new(store))
        }
    }
}

fn closed() -> StoreError {
    StoreError::StorageUnavailable("record store is closed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_fields() {
        let err = StoreError::ValidationFailed(vec!["petName".into(), "ownerName".into()]);
        assert_eq!(err.to_string(), "PetRecord validation failed: petName, ownerName");
    }

    #[tokio::test]
    async fn open_memory_store_starts_empty() {
        let store = open(&StoreKind::Memory).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
