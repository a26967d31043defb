#[cfg(feature = "console_error_panic_hook")]
extern crate console_error_panic_hook;

// Hexagonal architecture modules
pub mod adapters;
pub mod domain;
pub mod platform;
pub mod ports;

pub mod config;
pub mod facades;
#[cfg(target_arch = "wasm32")]
pub mod global;
pub mod measure;

pub use config::BridgeConfig;
pub use domain::bridge::{
    launch, BridgeError, BridgeState, PersistedValue, StorageArea, StorageChange, StorageKey,
    Subscription, SyncBridge,
};
pub use facades::native::SessionStore;
pub use platform::Platform;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start_app() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    Ok(())
}
