use super::error::BridgeError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_STORAGE_KEY: &str = "store";

/// Name of the single persisted slot shared by every context of an origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Result<Self, BridgeError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(BridgeError::InvalidStorageKey(
                "Storage key cannot be empty or whitespace only".to_string(),
            ));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self(DEFAULT_STORAGE_KEY.to_string())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StorageKey {
    type Error = BridgeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

/// Opaque serialized application state. The bridge never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedValue(String);

impl PersistedValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Serializes `value` to JSON.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Self, BridgeError> {
        serde_json::to_string(value)
            .map(Self)
            .map_err(|e| BridgeError::serialization_error(e.to_string()))
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, BridgeError> {
        serde_json::from_str(&self.0).map_err(|e| BridgeError::serialization_error(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for PersistedValue {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PersistedValue {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for PersistedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage partition a change notification originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageArea {
    /// Persistent area shared by every context of the origin.
    Local,
    /// Context-local area.
    Session,
    Other,
}

/// A change raised by the platform when another context modified storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub area: StorageArea,
    /// `None` when the whole area was cleared.
    pub key: Option<String>,
    pub new_value: Option<PersistedValue>,
}

impl StorageChange {
    pub fn new(area: StorageArea, key: Option<&str>, new_value: Option<PersistedValue>) -> Self {
        Self {
            area,
            key: key.map(str::to_string),
            new_value,
        }
    }

    /// True when the change targets `key` in the shared persistent area.
    pub fn concerns(&self, key: &StorageKey) -> bool {
        self.area == StorageArea::Local && self.key.as_deref() == Some(key.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BridgeState {
    Uninitialized,
    Bootstrapping,
    Active,
    /// Terminal: both paths were torn down by `detach`.
    Detached,
}

impl BridgeState {
    pub fn name(&self) -> &'static str {
        match self {
            BridgeState::Uninitialized => "Uninitialized",
            BridgeState::Bootstrapping => "Bootstrapping",
            BridgeState::Active => "Active",
            BridgeState::Detached => "Detached",
        }
    }
}
