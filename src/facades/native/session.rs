/// Native Rust facade: a ready-made application core for Rust hosts.
///
/// Holds the latest confirmed session value and lets callers observe every
/// confirmed write and every change made by another context. A write only
/// shows up in `current` once the bridge acknowledges it.
use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::subscription::{Listeners, StoreChannel, Subscription};
use crate::domain::bridge::types::PersistedValue;
use crate::ports::ApplicationPort;
use serde::Serialize;
use std::cell::RefCell;

pub struct SessionStore {
    store_cache: StoreChannel,
    current: RefCell<Option<PersistedValue>>,
    changes: Listeners<Option<PersistedValue>>,
    last_error: RefCell<Option<BridgeError>>,
}

impl SessionStore {
    /// Creates the store from the flags returned by bootstrap.
    pub fn new(initial: Option<PersistedValue>) -> Self {
        Self {
            store_cache: StoreChannel::new(),
            current: RefCell::new(initial),
            changes: Listeners::new(),
            last_error: RefCell::new(None),
        }
    }

    /// The bootstrapped value, or the latest acknowledged or remote change.
    pub fn current(&self) -> Option<PersistedValue> {
        self.current.borrow().clone()
    }

    /// Stores a new session value (login, refresh).
    pub fn save(&self, value: PersistedValue) {
        self.emit(Some(value));
    }

    pub fn save_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), BridgeError> {
        self.save(PersistedValue::encode(value)?);
        Ok(())
    }

    /// Drops the session (logout).
    pub fn clear(&self) {
        self.emit(None);
    }

    /// Observes acknowledged writes and other-context changes.
    pub fn on_change(&self, listener: impl Fn(Option<&PersistedValue>) + 'static) -> Subscription {
        self.changes.subscribe(move |value| listener(value.as_ref()))
    }

    pub fn last_error(&self) -> Option<BridgeError> {
        self.last_error.borrow().clone()
    }

    fn emit(&self, value: Option<PersistedValue>) {
        self.store_cache.emit(&value);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ApplicationPort for SessionStore {
    fn store_cache(&self) -> &StoreChannel {
        &self.store_cache
    }

    fn notify_store_change(&self, value: Option<PersistedValue>) {
        *self.current.borrow_mut() = value.clone();
        self.last_error.borrow_mut().take();
        self.changes.emit(&value);
    }

    fn persistence_unavailable(&self, error: &BridgeError) {
        *self.last_error.borrow_mut() = Some(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_save_emits_on_store_cache() {
        let store = SessionStore::default();
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let e = emitted.clone();
        let _subscription = store
            .store_cache()
            .subscribe(move |value| e.borrow_mut().push(value.clone()));

        store.save(PersistedValue::from("a"));
        store.clear();

        assert_eq!(*emitted.borrow(), vec![Some(PersistedValue::from("a")), None]);
    }

    #[test]
    fn test_current_waits_for_acknowledgment() {
        let store = SessionStore::new(Some(PersistedValue::from("old")));

        store.save(PersistedValue::from("new"));
        assert_eq!(store.current(), Some(PersistedValue::from("old")));

        store.persistence_unavailable(&BridgeError::persistence_unavailable("quota"));
        assert_eq!(store.current(), Some(PersistedValue::from("old")));

        store.notify_store_change(Some(PersistedValue::from("new")));
        assert_eq!(store.current(), Some(PersistedValue::from("new")));
    }

    #[test]
    fn test_save_json() {
        #[derive(Serialize)]
        struct Viewer<'a> {
            username: &'a str,
        }

        let store = SessionStore::default();
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let e = emitted.clone();
        let _subscription = store
            .store_cache()
            .subscribe(move |value| e.borrow_mut().push(value.clone()));

        store.save_json(&Viewer { username: "jake" }).unwrap();
        assert_eq!(
            *emitted.borrow(),
            vec![Some(PersistedValue::from("{\"username\":\"jake\"}"))]
        );
    }

    #[test]
    fn test_notify_updates_current_and_listeners() {
        let store = SessionStore::new(Some(PersistedValue::from("old")));
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let _subscription = store.on_change(move |value| {
            assert_eq!(value.map(PersistedValue::as_str), Some("new"));
            h.set(h.get() + 1);
        });

        store.notify_store_change(Some(PersistedValue::from("new")));

        assert_eq!(hits.get(), 1);
        assert_eq!(store.current(), Some(PersistedValue::from("new")));
    }

    #[test]
    fn test_persistence_error_is_kept_until_next_change() {
        let store = SessionStore::default();
        store.persistence_unavailable(&BridgeError::persistence_unavailable("quota"));
        assert!(store.last_error().is_some());

        store.notify_store_change(None);
        assert!(store.last_error().is_none());
    }
}
