use crate::domain::bridge::error::BridgeError;
use crate::global::{js_error_message, local_storage};
use crate::ports::KeyValueStoragePort;

/// `window.localStorage`, looked up on every call so a disabled or missing
/// store is reported per operation instead of at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| BridgeError::storage_unavailable(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| BridgeError::persistence_unavailable(js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), BridgeError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| BridgeError::persistence_unavailable(js_error_message(&e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_lifecycle() {
        let storage = LocalStorage::new();
        let key = "tabsync_unit_lifecycle";

        storage.remove(key).unwrap();
        assert_eq!(storage.get(key).unwrap(), None);

        storage.set(key, "{\"a\":1}").unwrap();
        assert_eq!(storage.get(key).unwrap(), Some("{\"a\":1}".to_string()));

        storage.remove(key).unwrap();
        assert_eq!(storage.get(key).unwrap(), None);
    }
}
