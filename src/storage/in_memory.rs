//! In-memory snapshot store for testing and development

use std::sync::{Mutex, PoisonError};

use crate::core::error::StorageError;
use crate::core::record::Record;
use crate::core::store::SnapshotStore;

/// Snapshot store that keeps the last persisted sequence in memory
///
/// Useful for testing and for running without a data file. Counts how many
/// times it has been asked to persist.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last: Option<Vec<Record>>,
    persist_count: usize,
}

impl InMemorySnapshotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that restores `records`
    pub fn with_snapshot(records: Vec<Record>) -> Self {
        Self {
            state: Mutex::new(State {
                last: Some(records),
                persist_count: 0,
            }),
        }
    }

    /// Number of successful `persist` calls
    pub fn persist_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .persist_count
    }

    /// Last persisted sequence
    pub fn last(&self) -> Option<Vec<Record>> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last
            .clone()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn persist(&self, records: &[Record]) -> Result<(), StorageError> {
        let mut state = self.state.lock().map_err(|_| StorageError::LockPoisoned)?;
        state.last = Some(records.to_vec());
        state.persist_count += 1;
        Ok(())
    }

    fn restore(&self) -> Result<Option<Vec<Record>>, StorageError> {
        let state = self.state.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(state.last.clone())
    }
}
