use crate::domain::bridge::error::BridgeError;

/// Port for synchronous key-value storage (browser `localStorage` contract).
pub trait KeyValueStoragePort {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError>;

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError>;

    fn remove(&self, key: &str) -> Result<(), BridgeError>;
}
