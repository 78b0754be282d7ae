//! Record storage
//!
//! The [`RecordStore`] trait is the seam between the HTTP handlers and the
//! document collection holding Test records.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local collection, lost on exit
//! - [`JsonFileStore`] - same collection, mirrored to a JSON file after
//!   every write
//!
//! All lookups return `Ok(None)` for an unknown id; callers decide what a
//! miss means. Writes run the record validator before touching the
//! collection.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::model::{NewRecord, Record, RecordId, RecordPatch};
use thiserror::Error;

/// Store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// A write failed the record validator
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The backing storage could not be reached or written
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored records break the collection invariants
    #[error("Corrupt collection: {0}")]
    Corrupt(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// I/O error from a file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document collection of Test records.
///
/// Implementations are shared across connection tasks, so every method
/// takes `&self` and synchronizes internally. Concurrent writers to the same
/// record resolve as last-write-wins.
pub trait RecordStore: Send + Sync {
    /// Make sure the backing storage is ready. Idempotent.
    fn ensure_connected(&self) -> StoreResult<()>;

    /// All records in insertion order
    fn list(&self) -> StoreResult<Vec<Record>>;

    fn get(&self, id: &RecordId) -> StoreResult<Option<Record>>;

    /// Validate and insert a new record, assigning its id
    fn create(&self, draft: NewRecord) -> StoreResult<Record>;

    /// Apply a partial update and return the post-update record
    fn update(&self, id: &RecordId, patch: RecordPatch) -> StoreResult<Option<Record>>;

    /// Remove a record, returning it if it existed
    fn delete(&self, id: &RecordId) -> StoreResult<Option<Record>>;
}
