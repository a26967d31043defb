use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::subscription::StoreChannel;
use crate::domain::bridge::types::PersistedValue;

/// The application core the bridge serves.
pub trait ApplicationPort {
    /// Outbound channel carrying every change to the application's persisted
    /// state (`None` clears it).
    fn store_cache(&self) -> &StoreChannel;

    /// Receives confirmed writes and changes made by other contexts.
    fn notify_store_change(&self, value: Option<PersistedValue>);

    /// Called when a write could not be persisted.
    fn persistence_unavailable(&self, _error: &BridgeError) {}
}
