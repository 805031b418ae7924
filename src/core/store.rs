//! Snapshot persistence trait

use crate::core::error::StorageError;
use crate::core::record::Record;

/// Trait for backends that persist the full record sequence
///
/// The record store calls [`persist`](SnapshotStore::persist) once after
/// every successful insert, while it still holds its lock, and
/// [`restore`](SnapshotStore::restore) once at startup. Implementations
/// must make `persist` atomic: a reader never observes a partial snapshot.
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored snapshot with `records`
    fn persist(&self, records: &[Record]) -> Result<(), StorageError>;

    /// Load the stored snapshot
    ///
    /// # Returns
    /// `None` when no snapshot exists yet
    fn restore(&self) -> Result<Option<Vec<Record>>, StorageError>;
}
