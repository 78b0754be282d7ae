//! JSON-file backed record collection
//!
//! The whole collection lives in memory and is rewritten to disk after each
//! successful mutation. The file is a JSON array of records.

use super::memory::Collection;
use super::{RecordStore, StoreError, StoreResult};
use crate::model::{NewRecord, Record, RecordId, RecordPatch};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

pub struct JsonFileStore {
    path: PathBuf,
    // None until the first successful load
    inner: RwLock<Option<Collection>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: RwLock::new(None),
        }
    }

    fn load(&self) -> StoreResult<Collection> {
        if !self.path.exists() {
            tracing::info!("Data file {:?} not found, starting empty", self.path);
            return Ok(Collection::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Collection::default());
        }
        let records: Vec<Record> = serde_json::from_str(&content)?;
        let collection = Collection::from_records(records)?;
        tracing::info!(
            "Loaded {} records from {:?}",
            collection.records().len(),
            self.path
        );
        Ok(collection)
    }

    fn persist(&self, collection: &Collection) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(collection.records())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Collection) -> T) -> StoreResult<T> {
        self.ensure_connected()?;
        let guard = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let collection = guard
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("store not loaded".to_string()))?;
        Ok(f(collection))
    }

    /// Run a mutation against a scratch copy and commit it only once the
    /// file write succeeds, so memory never runs ahead of disk.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut Collection) -> StoreResult<T>,
        changed: impl Fn(&T) -> bool,
    ) -> StoreResult<T> {
        self.ensure_connected()?;
        let mut guard = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let current = guard
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("store not loaded".to_string()))?;

        let mut scratch = current.clone();
        let result = f(&mut scratch)?;
        if changed(&result) {
            self.persist(&scratch)?;
            *guard = Some(scratch);
        }
        Ok(result)
    }
}

impl RecordStore for JsonFileStore {
    fn ensure_connected(&self) -> StoreResult<()> {
        {
            let guard = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
            if guard.is_some() {
                return Ok(());
            }
        }

        let mut guard = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Record>> {
        self.read(|c| c.records().to_vec())
    }

    fn get(&self, id: &RecordId) -> StoreResult<Option<Record>> {
        self.read(|c| c.get(id))
    }

    fn create(&self, draft: NewRecord) -> StoreResult<Record> {
        self.write(|c| c.create(draft), |_| true)
    }

    fn update(&self, id: &RecordId, patch: RecordPatch) -> StoreResult<Option<Record>> {
        self.write(|c| c.update(id, patch), Option::is_some)
    }

    fn delete(&self, id: &RecordId) -> StoreResult<Option<Record>> {
        self.write(|c| Ok(c.delete(id)), Option::is_some)
    }
}
