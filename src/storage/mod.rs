use std::{env, fs, path::PathBuf};

use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("$HOME is not defined")]
    HomeNotDefined,
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed blob: {0}")]
    MalformedBlob(#[from] serde_json::Error),
}

/// Flat directory of named JSON blobs under the user data dir. Apps that
/// outlive a session (notes, the snake high score) read and write here;
/// window state deliberately never does.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn open_default() -> Result<Self, StorageError> {
        let home_dir = env::var("HOME").map_err(|_| StorageError::HomeNotDefined)?;
        let root: PathBuf = [home_dir.as_str(), ".local", "share", "deskfolio"]
            .iter()
            .collect();
        Self::at(root)
    }

    pub fn at(root: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// `Ok(None)` when the blob was never written. A malformed blob is an
    /// error; callers decide whether to fall back to defaults.
    pub fn load_blob<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StorageError> {
        let path = self.blob_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save_blob<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        let path = self.blob_path(name);
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        debug!("saved blob {name}");
        Ok(())
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Payload {
        label: String,
        count: u32,
    }

    fn scratch_storage() -> Storage {
        let root = env::temp_dir().join(format!("deskfolio-test-{}", Uuid::new_v4()));
        Storage::at(root).expect("temp storage")
    }

    #[test]
    fn missing_blob_reads_as_none() {
        let storage = scratch_storage();
        let loaded: Option<Payload> = storage.load_blob("nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn blobs_round_trip() {
        let storage = scratch_storage();
        let payload = Payload { label: "high score".to_string(), count: 42 };

        storage.save_blob("scores", &payload).unwrap();
        let loaded: Payload = storage.load_blob("scores").unwrap().expect("blob exists");
        assert_eq!(loaded, payload);
    }

    #[test]
    fn malformed_blobs_are_reported_not_swallowed() {
        let storage = scratch_storage();
        fs::write(storage.root().join("scores.json"), "{not json").unwrap();

        let loaded = storage.load_blob::<Payload>("scores");
        assert!(matches!(loaded, Err(StorageError::MalformedBlob(_))));
    }
}
