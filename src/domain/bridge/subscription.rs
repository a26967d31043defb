use super::types::PersistedValue;
use std::cell::RefCell;
use std::rc::Rc;

/// Handle to a registered observer. Dropping it (or calling `unsubscribe`)
/// removes the observer.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A handle with nothing to dispose.
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    pub fn unsubscribe(mut self) {
        self.dispose_now();
    }

    /// Keeps the listener registered for the rest of the process.
    pub fn forget(mut self) {
        self.dispose = None;
    }

    fn dispose_now(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

type Listener<T> = Rc<dyn Fn(&T)>;

struct ListenerTable<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// Single-threaded observer list. Clones share the same table.
pub struct Listeners<T> {
    table: Rc<RefCell<ListenerTable<T>>>,
}

/// Channel the application emits its persisted-state changes on.
pub type StoreChannel = Listeners<Option<PersistedValue>>;

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            table: Rc::new(RefCell::new(ListenerTable {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.entries.push((id, Rc::new(listener)));
            id
        };

        let table = Rc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Calls every listener registered at the time of the call. Listeners may
    /// subscribe or unsubscribe while being notified.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .table
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_all_listeners() {
        let listeners: Listeners<u32> = Listeners::new();
        let total = Rc::new(Cell::new(0));

        let t1 = total.clone();
        let _a = listeners.subscribe(move |v| t1.set(t1.get() + v));
        let t2 = total.clone();
        let _b = listeners.subscribe(move |v| t2.set(t2.get() + v * 10));

        listeners.emit(&2);
        assert_eq!(total.get(), 22);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listeners: Listeners<u32> = Listeners::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let subscription = listeners.subscribe(move |_| h.set(h.get() + 1));
        listeners.emit(&0);
        drop(subscription);
        listeners.emit(&0);

        assert_eq!(hits.get(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let listeners: Listeners<()> = Listeners::new();
        let subscription = listeners.subscribe(|_| {});
        assert_eq!(listeners.len(), 1);
        subscription.unsubscribe();
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_forget_keeps_listener() {
        let listeners: Listeners<()> = Listeners::new();
        listeners.subscribe(|_| {}).forget();
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_unsubscribe_after_table_dropped() {
        let listeners: Listeners<()> = Listeners::new();
        let subscription = listeners.subscribe(|_| {});
        drop(listeners);
        subscription.unsubscribe();
    }

    #[test]
    fn test_subscribe_during_emit() {
        let listeners: Listeners<()> = Listeners::new();
        let inner = listeners.clone();
        let registered = Rc::new(RefCell::new(Vec::new()));

        let r = registered.clone();
        let _outer = listeners.subscribe(move |_| {
            r.borrow_mut().push(inner.subscribe(|_| {}));
        });

        listeners.emit(&());
        assert_eq!(listeners.len(), 2);
    }
}
