//! JSON file snapshot store

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::StorageError;
use crate::core::record::Record;
use crate::core::store::SnapshotStore;

/// Snapshot store writing the whole sequence to one JSON file
///
/// Writes go to `<path>.tmp` first and are then renamed over `<path>`, so
/// the file on disk is always a complete snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn persist(&self, records: &[Record]) -> Result<(), StorageError> {
        let tmp = self.tmp_path();
        let file = fs::File::create(&tmp).map_err(|e| self.io_error(&tmp, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records)?;
        writer.flush().map_err(|e| self.io_error(&tmp, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| self.io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(&self.path, e))?;
        Ok(())
    }

    fn restore(&self) -> Result<Option<Vec<Record>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = fs::File::open(&self.path).map_err(|e| self.io_error(&self.path, e))?;
        let records = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(records))
    }
}
