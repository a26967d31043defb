use super::error::BridgeError;
use super::types::{PersistedValue, StorageKey};
use crate::platform::Platform;

/// Writes `value` under `key`, or removes the entry when `value` is `None`.
/// Last write wins.
pub fn persist(
    platform: &Platform,
    key: &StorageKey,
    value: Option<&PersistedValue>,
) -> Result<(), BridgeError> {
    let storage = platform.storage();
    let result = match value {
        Some(value) => storage.set(key.as_str(), value.as_str()),
        None => storage.remove(key.as_str()),
    };

    result.map_err(|e| match e {
        BridgeError::PersistenceUnavailable(_) => e,
        other => BridgeError::persistence_unavailable(other.to_string()),
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::adapters::native::MemoryOrigin;
    use std::rc::Rc;

    #[test]
    fn test_persist_then_clear() {
        let origin = MemoryOrigin::new();
        let platform = Platform::new().with_storage(Rc::new(origin.open_context()));
        let key = StorageKey::default();

        persist(&platform, &key, Some(&PersistedValue::from("abc"))).unwrap();
        assert_eq!(platform.storage().get("store").unwrap(), Some("abc".to_string()));

        persist(&platform, &key, None).unwrap();
        assert_eq!(platform.storage().get("store").unwrap(), None);
    }

    #[test]
    fn test_persist_overwrites() {
        let origin = MemoryOrigin::new();
        let platform = Platform::new().with_storage(Rc::new(origin.open_context()));
        let key = StorageKey::default();

        persist(&platform, &key, Some(&PersistedValue::from("first"))).unwrap();
        persist(&platform, &key, Some(&PersistedValue::from("second"))).unwrap();
        assert_eq!(platform.storage().get("store").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_failures_become_persistence_unavailable() {
        let origin = MemoryOrigin::disabled();
        let platform = Platform::new().with_storage(Rc::new(origin.open_context()));

        let result = persist(&platform, &StorageKey::default(), Some(&PersistedValue::from("x")));
        assert!(matches!(result, Err(BridgeError::PersistenceUnavailable(_))));
    }
}
