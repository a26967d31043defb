pub mod bootstrap;
pub mod error;
pub mod operations;
pub mod subscription;
pub mod sync;
pub mod types;

pub use bootstrap::{load, try_load};
pub use error::BridgeError;
pub use operations::persist;
pub use subscription::{Listeners, StoreChannel, Subscription};
pub use sync::{launch, SyncBridge};
pub use types::{
    BridgeState, PersistedValue, StorageArea, StorageChange, StorageKey, DEFAULT_STORAGE_KEY,
};
