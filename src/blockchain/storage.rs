use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use super::block::Block;

/// File name of the chain snapshot inside the data directory
pub const SNAPSHOT_FILE: &str = "blockchain.json";

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

/// Best-effort JSON snapshot of the chain
///
/// The file is overwritten in place on every save. There is no atomic
/// rename and no integrity check on read; callers validate what they load.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store writing into `data_dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, StorageError> {
        fs::create_dir_all(&data_dir)?;

        Ok(SnapshotStore {
            path: data_dir.as_ref().join(SNAPSHOT_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the chain to the snapshot file
    pub fn save(&self, chain: &[Block]) -> Result<(), StorageError> {
        let json = serde_json::to_vec(chain)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&self.path, json)?;
        debug!("Wrote {} blocks to {}", chain.len(), self.path.display());

        Ok(())
    }

    /// Reads the chain from the snapshot file
    ///
    /// # Returns
    ///
    /// `None` if no snapshot has been written yet
    pub fn load(&self) -> Result<Option<Vec<Block>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let chain = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::DeserializationError(e.to_string()))?;

        Ok(Some(chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> SnapshotStore {
        let dir = std::env::temp_dir().join(format!("ledger-node-{}", Uuid::new_v4().simple()));
        SnapshotStore::new(dir).unwrap()
    }

    #[test]
    fn test_load_without_snapshot() {
        let store = temp_store();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = temp_store();
        let chain = vec![Block::genesis()];

        store.save(&chain).unwrap();

        assert_eq!(store.load().unwrap(), Some(chain));
        let _ = fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let store = temp_store();
        fs::write(store.path(), b"not json").unwrap();

        assert!(matches!(
            store.load(),
            Err(StorageError::DeserializationError(_))
        ));
    }
}
