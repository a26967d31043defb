use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::subscription::{Listeners, Subscription};
use crate::domain::bridge::types::{PersistedValue, StorageArea, StorageChange};
use crate::ports::{KeyValueStoragePort, StorageEventsPort, StorageListener};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct OriginState {
    entries: HashMap<String, String>,
    contexts: Vec<(u64, Listeners<StorageChange>)>,
    next_context: u64,
    quota: Option<usize>,
    disabled: bool,
}

/// In-memory shared storage area of one origin.
///
/// Every `MemoryContext` opened on it behaves like a tab: writes are visible to
/// all contexts, and change events reach every context except the writer.
/// Events are delivered immediately, inside the writer's call.
#[derive(Clone)]
pub struct MemoryOrigin {
    state: Rc<RefCell<OriginState>>,
}

impl MemoryOrigin {
    pub fn new() -> Self {
        Self::build(None, false)
    }

    /// Writes that would grow keys plus values beyond `bytes` fail.
    pub fn with_quota(bytes: usize) -> Self {
        Self::build(Some(bytes), false)
    }

    /// Every operation fails, as when the host has disabled storage.
    pub fn disabled() -> Self {
        Self::build(None, true)
    }

    fn build(quota: Option<usize>, disabled: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(OriginState {
                entries: HashMap::new(),
                contexts: Vec::new(),
                next_context: 0,
                quota,
                disabled,
            })),
        }
    }

    pub fn open_context(&self) -> MemoryContext {
        let listeners = Listeners::new();
        let mut state = self.state.borrow_mut();
        let id = state.next_context;
        state.next_context += 1;
        state.contexts.push((id, listeners.clone()));

        MemoryContext {
            id,
            origin: self.clone(),
            listeners,
        }
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.state.borrow().entries.clone()
    }

    pub fn context_count(&self) -> usize {
        self.state.borrow().contexts.len()
    }

    fn check_enabled(&self) -> Result<(), BridgeError> {
        if self.state.borrow().disabled {
            return Err(BridgeError::storage_unavailable("storage is disabled"));
        }
        Ok(())
    }

    fn broadcast_from(&self, writer: u64, change: StorageChange) {
        let targets: Vec<Listeners<StorageChange>> = self
            .state
            .borrow()
            .contexts
            .iter()
            .filter(|(id, _)| *id != writer)
            .map(|(_, listeners)| listeners.clone())
            .collect();

        for listeners in targets {
            listeners.emit(&change);
        }
    }
}

impl Default for MemoryOrigin {
    fn default() -> Self {
        Self::new()
    }
}

/// One execution context (tab) of a `MemoryOrigin`.
pub struct MemoryContext {
    id: u64,
    origin: MemoryOrigin,
    listeners: Listeners<StorageChange>,
}

impl MemoryContext {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Empties the whole area; other contexts see a change without a key.
    pub fn clear(&self) -> Result<(), BridgeError> {
        self.origin.check_enabled()?;
        let had_entries = {
            let mut state = self.origin.state.borrow_mut();
            let had_entries = !state.entries.is_empty();
            state.entries.clear();
            had_entries
        };
        if had_entries {
            self.origin
                .broadcast_from(self.id, StorageChange::new(StorageArea::Local, None, None));
        }
        Ok(())
    }
}

impl KeyValueStoragePort for MemoryContext {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        self.origin.check_enabled()?;
        Ok(self.origin.state.borrow().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.origin.check_enabled()?;
        {
            let mut state = self.origin.state.borrow_mut();
            if state.entries.get(key).map(String::as_str) == Some(value) {
                return Ok(());
            }

            if let Some(quota) = state.quota {
                let used: usize = state
                    .entries
                    .iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| k.len() + v.len())
                    .sum();
                if used + key.len() + value.len() > quota {
                    return Err(BridgeError::persistence_unavailable(format!(
                        "quota of {quota} bytes exceeded"
                    )));
                }
            }

            state.entries.insert(key.to_string(), value.to_string());
        }

        self.origin.broadcast_from(
            self.id,
            StorageChange::new(StorageArea::Local, Some(key), Some(PersistedValue::from(value))),
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BridgeError> {
        self.origin.check_enabled()?;
        let removed = self.origin.state.borrow_mut().entries.remove(key).is_some();
        if removed {
            self.origin
                .broadcast_from(self.id, StorageChange::new(StorageArea::Local, Some(key), None));
        }
        Ok(())
    }
}

impl StorageEventsPort for MemoryContext {
    fn subscribe(&self, listener: StorageListener) -> Result<Subscription, BridgeError> {
        Ok(self.listeners.subscribe(move |change| listener(change)))
    }
}

impl Drop for MemoryContext {
    fn drop(&mut self) {
        let id = self.id;
        self.origin
            .state
            .borrow_mut()
            .contexts
            .retain(|(context, _)| *context != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn record(context: &MemoryContext) -> (Rc<RefCell<Vec<StorageChange>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let subscription = context
            .subscribe(Box::new(move |change: &StorageChange| s.borrow_mut().push(change.clone())))
            .unwrap();
        (seen, subscription)
    }

    #[test]
    fn test_contexts_share_entries() {
        let origin = MemoryOrigin::new();
        let a = origin.open_context();
        let b = origin.open_context();

        a.set("store", "v1").unwrap();
        assert_eq!(b.get("store").unwrap(), Some("v1".to_string()));
    }

    #[test]
    fn test_events_skip_writer() {
        let origin = MemoryOrigin::new();
        let a = origin.open_context();
        let b = origin.open_context();
        let (seen_a, _sa) = record(&a);
        let (seen_b, _sb) = record(&b);

        a.set("store", "v1").unwrap();

        assert!(seen_a.borrow().is_empty());
        assert_eq!(
            *seen_b.borrow(),
            vec![StorageChange::new(
                StorageArea::Local,
                Some("store"),
                Some(PersistedValue::from("v1"))
            )]
        );
    }

    #[test]
    fn test_unchanged_value_raises_no_event() {
        let origin = MemoryOrigin::new();
        let a = origin.open_context();
        let b = origin.open_context();
        let (seen_b, _sb) = record(&b);

        a.set("store", "same").unwrap();
        a.set("store", "same").unwrap();
        a.remove("missing").unwrap();

        assert_eq!(seen_b.borrow().len(), 1);
    }

    #[test]
    fn test_remove_raises_null_value() {
        let origin = MemoryOrigin::new();
        let a = origin.open_context();
        let b = origin.open_context();
        a.set("store", "v").unwrap();
        let (seen_b, _sb) = record(&b);

        a.remove("store").unwrap();

        assert_eq!(
            *seen_b.borrow(),
            vec![StorageChange::new(StorageArea::Local, Some("store"), None)]
        );
    }

    #[test]
    fn test_clear_raises_keyless_event() {
        let origin = MemoryOrigin::new();
        let a = origin.open_context();
        let b = origin.open_context();
        a.set("store", "v").unwrap();
        let (seen_b, _sb) = record(&b);

        a.clear().unwrap();

        assert!(origin.snapshot().is_empty());
        assert_eq!(seen_b.borrow()[0].key, None);
    }

    #[test]
    fn test_quota() {
        let origin = MemoryOrigin::with_quota(10);
        let a = origin.open_context();

        a.set("k", "123456789").unwrap();
        assert!(matches!(
            a.set("k2", "x"),
            Err(BridgeError::PersistenceUnavailable(_))
        ));
        a.set("k", "12345").unwrap();
    }

    #[test]
    fn test_disabled_origin() {
        let origin = MemoryOrigin::disabled();
        let a = origin.open_context();

        assert!(a.get("store").is_err());
        assert!(a.set("store", "v").is_err());
        assert!(a.remove("store").is_err());
    }

    #[test]
    fn test_dropped_context_is_unregistered() {
        let origin = MemoryOrigin::new();
        let a = origin.open_context();
        {
            let _b = origin.open_context();
            assert_eq!(origin.context_count(), 2);
        }
        assert_eq!(origin.context_count(), 1);
        a.set("store", "v").unwrap();
    }
}
