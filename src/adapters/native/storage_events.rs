use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::subscription::Subscription;
use crate::ports::{StorageEventsPort, StorageListener};

/// Native storage events adapter (no-op).
///
/// A single native process has no other contexts sharing its store, so no
/// change is ever raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorageEvents;

impl NoopStorageEvents {
    pub fn new() -> Self {
        Self
    }
}

impl StorageEventsPort for NoopStorageEvents {
    fn subscribe(&self, _listener: StorageListener) -> Result<Subscription, BridgeError> {
        Ok(Subscription::noop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bridge::types::StorageChange;

    #[test]
    fn test_subscribe_succeeds() {
        let events = NoopStorageEvents::new();
        let subscription = events.subscribe(Box::new(|_: &StorageChange| {}));
        assert!(subscription.is_ok());
    }
}
