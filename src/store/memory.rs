//! In-memory record collection

use super::{RecordStore, StoreError, StoreResult};
use crate::model::{validate_name, NewRecord, Record, RecordId, RecordPatch};
use std::collections::HashSet;
use std::sync::RwLock;

/// Insertion-ordered record collection shared by the store backends
#[derive(Debug, Clone, Default)]
pub(super) struct Collection {
    records: Vec<Record>,
}

impl Collection {
    /// Adopt existing records, rejecting malformed ids, blank names and
    /// duplicate ids
    pub(super) fn from_records(records: Vec<Record>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if RecordId::parse(record.id.as_str()).is_none() {
                return Err(StoreError::Corrupt(format!(
                    "malformed identifier '{}'",
                    record.id
                )));
            }
            if let Err(message) = validate_name(Some(record.name.as_str())) {
                return Err(StoreError::Corrupt(format!("record {}: {}", record.id, message)));
            }
            if !seen.insert(&record.id) {
                return Err(StoreError::Corrupt(format!("duplicate identifier '{}'", record.id)));
            }
        }
        Ok(Self { records })
    }

    pub(super) fn records(&self) -> &[Record] {
        &self.records
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub(super) fn get(&self, id: &RecordId) -> Option<Record> {
        self.position(id).map(|idx| self.records[idx].clone())
    }

    pub(super) fn create(&mut self, draft: NewRecord) -> StoreResult<Record> {
        let name = validate_name(draft.name.as_deref()).map_err(StoreError::Validation)?;
        let record = Record {
            id: RecordId::generate(),
            name: name.to_string(),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    pub(super) fn update(
        &mut self,
        id: &RecordId,
        patch: RecordPatch,
    ) -> StoreResult<Option<Record>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            validate_name(Some(&name)).map_err(StoreError::Validation)?;
            self.records[idx].name = name;
        }

        Ok(Some(self.records[idx].clone()))
    }

    pub(super) fn delete(&mut self, id: &RecordId) -> Option<Record> {
        self.position(id).map(|idx| self.records.remove(idx))
    }
}

/// Process-local store; contents are lost when the server exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, keeping their ids
    pub fn with_records(records: Vec<Record>) -> StoreResult<Self> {
        Ok(Self {
            inner: RwLock::new(Collection::from_records(records)?),
        })
    }
}

impl RecordStore for MemoryStore {
    fn ensure_connected(&self) -> StoreResult<()> {
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Record>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.records().to_vec())
    }

    fn get(&self, id: &RecordId) -> StoreResult<Option<Record>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.get(id))
    }

    fn create(&self, draft: NewRecord) -> StoreResult<Record> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.create(draft)
    }

    fn update(&self, id: &RecordId, patch: RecordPatch) -> StoreResult<Option<Record>> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.update(id, patch)
    }

    fn delete(&self, id: &RecordId) -> StoreResult<Option<Record>> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.delete(id))
    }
}
