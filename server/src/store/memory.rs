use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{closed, Collection, RecordStore, StoreError};
use crate::record::{PetRecord, RecordInput};

/// Record store held in process memory. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Collection>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(closed());
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, input: RecordInput) -> Result<PetRecord, StoreError> {
        let mut records = self.records.write().await;
        self.ensure_open()?;
        let record = records.insert(input)?;
        tracing::debug!(id = %record.id, "inserted record");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<PetRecord>, StoreError> {
        let records = self.records.read().await;
        self.ensure_open()?;
        Ok(records.list())
    }

    async fn find(&self, id: &str) -> Result<Option<PetRecord>, StoreError> {
        let records = self.records.read().await;
        self.ensure_open()?;
        records.find(id)
    }

    async fn replace(
        &self,
        id: &str,
        input: RecordInput,
    ) -> Result<Option<PetRecord>, StoreError> {
        let mut records = self.records.write().await;
        self.ensure_open()?;
        let previous = records.replace(id, input)?;
        tracing::debug!(id, found = previous.is_some(), "replaced record");
        Ok(previous)
    }

    async fn remove(&self, id: &str) -> Result<Option<PetRecord>, StoreError> {
        let mut records = self.records.write().await;
        self.ensure_open()?;
        let removed = records.remove(id)?;
        tracing::debug!(id, found = removed.is_some(), "removed record");
        Ok(removed)
    }

    async fn close(&self) -> Result<(), StoreError> {
        let _records = self.records.write().await;
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
