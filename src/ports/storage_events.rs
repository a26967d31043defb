use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::subscription::Subscription;
use crate::domain::bridge::types::StorageChange;

pub type StorageListener = Box<dyn Fn(&StorageChange)>;

/// Port for storage-change notifications raised by *other* contexts.
///
/// Implementations must never deliver a change back to the context that made it.
pub trait StorageEventsPort {
    fn subscribe(&self, listener: StorageListener) -> Result<Subscription, BridgeError>;
}
