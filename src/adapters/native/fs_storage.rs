use crate::config::DEFAULT_DATA_DIR;
use crate::domain::bridge::error::BridgeError;
use crate::ports::KeyValueStoragePort;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Native filesystem storage adapter: one file per key under `root`.
///
/// File names are the hex encoding of the key so any key string is safe.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(hex::encode(key.as_bytes()))
    }
}

impl Default for FsStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl KeyValueStoragePort for FsStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BridgeError::storage_unavailable(format!(
                "Failed to read entry: {e}"
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        fs::create_dir_all(&self.root).map_err(|e| {
            BridgeError::persistence_unavailable(format!("Failed to create data directory: {e}"))
        })?;
        fs::write(self.entry_path(key), value)
            .map_err(|e| BridgeError::persistence_unavailable(format!("Failed to write entry: {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), BridgeError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BridgeError::persistence_unavailable(format!(
                "Failed to delete entry: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> FsStorage {
        let root = std::env::temp_dir().join(format!("tabsync_fs_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        FsStorage::new(root)
    }

    #[test]
    fn test_default_root() {
        assert_eq!(FsStorage::default().root(), Path::new("./tabsync_data"));
    }

    #[test]
    fn test_entry_path_is_hex() {
        let storage = FsStorage::new("/data");
        assert_eq!(storage.entry_path("store"), PathBuf::from("/data/73746f7265"));
    }

    #[test]
    fn test_entry_lifecycle() {
        let storage = scratch("lifecycle");

        assert_eq!(storage.get("store").unwrap(), None);

        storage.set("store", "{\"token\":\"abc\"}").unwrap();
        assert_eq!(
            storage.get("store").unwrap(),
            Some("{\"token\":\"abc\"}".to_string())
        );

        storage.remove("store").unwrap();
        assert_eq!(storage.get("store").unwrap(), None);
        storage.remove("store").unwrap();

        let _ = fs::remove_dir_all(storage.root());
    }

    #[test]
    fn test_keys_with_separators() {
        let storage = scratch("separators");

        storage.set("../escape/key", "v").unwrap();
        assert_eq!(storage.get("../escape/key").unwrap(), Some("v".to_string()));

        let _ = fs::remove_dir_all(storage.root());
    }
}
