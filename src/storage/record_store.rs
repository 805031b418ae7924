//! Canonical record sequence behind one exclusive lock

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::error::{CatalogError, RecordError, StorageError};
use crate::core::record::Record;
use crate::core::store::SnapshotStore;

/// Authoritative, ordered record sequence
///
/// Every operation takes the same mutex for its whole duration, so a
/// snapshot always reflects one point in time and an insert is persisted
/// before any other operation can observe it. The guard is dropped on every
/// exit path, including errors.
pub struct RecordStore {
    records: Mutex<Vec<Record>>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self::with_records(Vec::new(), snapshots)
    }

    /// Create a store holding `records`, without persisting them
    pub fn with_records(records: Vec<Record>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            records: Mutex::new(records),
            snapshots,
        }
    }

    /// Restore the last snapshot, or seed and persist a fresh dataset
    pub fn open(
        snapshots: Arc<dyn SnapshotStore>,
        seed: impl FnOnce() -> Vec<Record>,
    ) -> Result<Self, StorageError> {
        match snapshots.restore()? {
            Some(records) => {
                tracing::info!(count = records.len(), "Restored record snapshot");
                Ok(Self::with_records(records, snapshots))
            }
            None => {
                let records = seed();
                snapshots.persist(&records)?;
                tracing::info!(count = records.len(), "Seeded sample records");
                Ok(Self::with_records(records, snapshots))
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Record>>, StorageError> {
        self.records.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Copy of the current sequence
    pub fn snapshot(&self) -> Result<Vec<Record>, StorageError> {
        Ok(self.lock()?.clone())
    }

    /// Find a record by identifier
    pub fn lookup(&self, id: &str) -> Result<Option<Record>, StorageError> {
        Ok(self.lock()?.iter().find(|r| r.id == id).cloned())
    }

    /// Number of records
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Append a record and persist the full sequence
    ///
    /// Fails with [`RecordError::AlreadyExists`] on a duplicate id. If
    /// persisting fails the record is removed again, so a failed insert
    /// never changes the store.
    pub fn insert(&self, record: Record) -> Result<Record, CatalogError> {
        let mut records = self.lock()?;

        if records.iter().any(|r| r.id == record.id) {
            return Err(RecordError::AlreadyExists { id: record.id }.into());
        }

        records.push(record);
        if let Err(e) = self.snapshots.persist(&records) {
            records.pop();
            tracing::warn!(error = %e, "Persisting snapshot failed, insert rolled back");
            return Err(e.into());
        }

        let inserted = records[records.len() - 1].clone();
        tracing::debug!(id = %inserted.id, total = records.len(), "Record inserted");
        Ok(inserted)
    }
}
