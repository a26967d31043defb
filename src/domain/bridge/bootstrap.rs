use super::error::BridgeError;
use super::types::{PersistedValue, StorageKey};
use crate::platform::Platform;
use crate::time_it;

/// Reads the value stored under `key`, surfacing storage failures.
pub fn try_load(
    platform: &Platform,
    key: &StorageKey,
) -> Result<Option<PersistedValue>, BridgeError> {
    Ok(platform
        .storage()
        .get(key.as_str())?
        .map(PersistedValue::from))
}

/// Reads the value stored under `key` for the application's initial flags.
///
/// Unavailable storage degrades to a fresh session: the failure is logged and
/// treated as absent.
pub fn load(platform: &Platform, key: &StorageKey) -> Option<PersistedValue> {
    time_it!(platform, "tabsync:bootstrap", {
        match try_load(platform, key) {
            Ok(Some(value)) => {
                platform
                    .logger()
                    .log(&format!("Restored '{key}' ({} bytes)", value.len()));
                Some(value)
            }
            Ok(None) => {
                platform
                    .logger()
                    .log(&format!("No persisted value under '{key}'"));
                None
            }
            Err(e) => {
                platform.logger().warn(&format!(
                    "Could not read '{key}', starting with a fresh session: {e}"
                ));
                None
            }
        }
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::adapters::native::MemoryOrigin;
    use std::rc::Rc;

    fn platform_for(origin: &MemoryOrigin) -> Platform {
        Platform::new().with_storage(Rc::new(origin.open_context()))
    }

    #[test]
    fn test_load_absent() {
        let origin = MemoryOrigin::new();
        let platform = platform_for(&origin);
        assert_eq!(load(&platform, &StorageKey::default()), None);
    }

    #[test]
    fn test_load_returns_stored_value() {
        let origin = MemoryOrigin::new();
        let platform = platform_for(&origin);
        platform.storage().set("store", "{\"token\":\"t\"}").unwrap();

        assert_eq!(
            load(&platform, &StorageKey::default()),
            Some(PersistedValue::from("{\"token\":\"t\"}"))
        );
    }

    #[test]
    fn test_load_fails_soft_when_disabled() {
        let origin = MemoryOrigin::disabled();
        let platform = platform_for(&origin);

        assert!(try_load(&platform, &StorageKey::default()).is_err());
        assert_eq!(load(&platform, &StorageKey::default()), None);
    }
}
