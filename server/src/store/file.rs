//! Record store persisted as a JSON document file.
//!
//! The whole collection is written to a sibling temp file, synced, and renamed
//! over the target on every mutation, so the file on disk always holds a
//! complete collection. A mutation is applied in memory only after the write
//! succeeds.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, sync::RwLock};

use super::{closed, Collection, RecordStore, StoreError};
use crate::record::{PetRecord, RecordInput};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: RwLock<Collection>,
    closed: AtomicBool,
}

impl FileStore {
    /// Load the collection at `path`, creating an empty file if none exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let collection = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let records: Vec<PetRecord> = serde_json::from_slice(&bytes)?;
                Collection::from_records(records)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                let empty = Collection::new();
                write_collection(&path, &empty).await?;
                empty
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            records: RwLock::new(collection),
            closed: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Checked with the lock held, so nothing lands after `close` returns.
    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(closed());
        }
        Ok(())
    }

    /// Run `op` on a copy of the collection, persist the copy, then install it.
    ///
    /// The file is left alone when `changed` says the result touched nothing.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Collection) -> Result<T, StoreError>,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T, StoreError> {
        let mut guard = self.records.write().await;
        self.ensure_open()?;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        if !changed(&out) {
            return Ok(out);
        }
        if let Err(err) = write_collection(&self.path, &next).await {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist records");
            return Err(err);
        }
        *guard = next;
        Ok(out)
    }
}

async fn write_collection(path: &Path, collection: &Collection) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(&collection.list())?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(&bytes).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(&tmp, path).await?;
    sync_parent(path).await
}

/// Make the rename itself durable.
#[cfg(unix)]
async fn sync_parent(path: &Path) -> Result<(), StoreError> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    tokio::fs::File::open(parent).await?.sync_all().await?;
    Ok(())
}

#[cfg(not(unix))]
async fn sync_parent(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[async_trait]
impl RecordStore for FileStore {
    async fn insert(&self, input: RecordInput) -> Result<PetRecord, StoreError> {
        let record = self.mutate(|c| c.insert(input), |_| true).await?;
        tracing::debug!(id = %record.id, "inserted record");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<PetRecord>, StoreError> {
        let guard = self.records.read().await;
        self.ensure_open()?;
        Ok(guard.list())
    }

    async fn find(&self, id: &str) -> Result<Option<PetRecord>, StoreError> {
        let guard = self.records.read().await;
        self.ensure_open()?;
        guard.find(id)
    }

    async fn replace(
        &self,
        id: &str,
        input: RecordInput,
    ) -> Result<Option<PetRecord>, StoreError> {
        let previous = self.mutate(|c| c.replace(id, input), Option::is_some).await?;
        tracing::debug!(id, found = previous.is_some(), "replaced record");
        Ok(previous)
    }

    async fn remove(&self, id: &str) -> Result<Option<PetRecord>, StoreError> {
        let removed = self.mutate(|c| c.remove(id), Option::is_some).await?;
        tracing::debug!(id, found = removed.is_some(), "removed record");
        Ok(removed)
    }

    async fn close(&self) -> Result<(), StoreError> {
        // Every acknowledged mutation is already on disk.
        let _guard = self.records.write().await;
        self.closed.store(true, Ordering::Release);
        tracing::debug!(path = %self.path.display(), "closed record file");
        Ok(())
    }
}
