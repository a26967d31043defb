use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::types::{StorageKey, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_OUTBOUND_PORT: &str = "storeCache";
pub const DEFAULT_INBOUND_PORT: &str = "onStoreChange";
pub const DEFAULT_DATA_DIR: &str = "./tabsync_data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    pub storage_key: String,
    /// Application port the bridge subscribes to for local changes.
    pub outbound_port: String,
    /// Application port the bridge sends confirmed and remote changes to.
    pub inbound_port: String,
    /// Root directory of the native file-backed store.
    pub data_dir: String,
    /// Optional application port told about failed writes.
    pub error_port: Option<String>,
    pub debug: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            outbound_port: DEFAULT_OUTBOUND_PORT.to_string(),
            inbound_port: DEFAULT_INBOUND_PORT.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            error_port: None,
            debug: false,
        }
    }
}

impl BridgeConfig {
    /// Defaults overridden by `TABSYNC_STORAGE_KEY`, `TABSYNC_DATA_DIR` and
    /// `TABSYNC_DEBUG`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            storage_key: env::var("TABSYNC_STORAGE_KEY").unwrap_or(defaults.storage_key),
            data_dir: env::var("TABSYNC_DATA_DIR").unwrap_or(defaults.data_dir),
            debug: env::var("TABSYNC_DEBUG")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.debug),
            ..defaults
        }
    }

    pub fn storage_key(&self) -> Result<StorageKey, BridgeError> {
        StorageKey::new(self.storage_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_names() {
        let config = BridgeConfig::default();
        assert_eq!(config.storage_key, "store");
        assert_eq!(config.outbound_port, "storeCache");
        assert_eq!(config.inbound_port, "onStoreChange");
        assert_eq!(config.error_port, None);
        assert!(!config.debug);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BridgeConfig =
            serde_json::from_str(r#"{"storageKey": "session", "debug": true}"#).unwrap();
        assert_eq!(config.storage_key, "session");
        assert!(config.debug);
        assert_eq!(config.outbound_port, DEFAULT_OUTBOUND_PORT);
        assert_eq!(config.data_dir, DEFAULT_DATA_DIR);
    }

    #[test]
    fn test_storage_key_validation() {
        let config = BridgeConfig {
            storage_key: " ".to_string(),
            ..BridgeConfig::default()
        };
        assert!(matches!(
            config.storage_key(),
            Err(BridgeError::InvalidStorageKey(_))
        ));
    }
}
