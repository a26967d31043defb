/// Adapters module - platform-specific implementations of ports.

pub mod global_clock;
pub mod global_logger;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub use native::ConsoleLogger;
#[cfg(target_arch = "wasm32")]
pub use wasm::ConsoleLogger;

pub use global_clock::clock;
pub use global_logger::logger;

use crate::config::BridgeConfig;
use crate::ports::{KeyValueStoragePort, SchedulerPort, StorageEventsPort};
use std::rc::Rc;

/// Default persistent store for the current target.
#[cfg(target_arch = "wasm32")]
pub fn default_storage(_config: &BridgeConfig) -> Rc<dyn KeyValueStoragePort> {
    Rc::new(wasm::LocalStorage::new())
}

/// Default persistent store for the current target.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage(config: &BridgeConfig) -> Rc<dyn KeyValueStoragePort> {
    Rc::new(native::FsStorage::new(&config.data_dir))
}

#[cfg(target_arch = "wasm32")]
pub fn default_storage_events() -> Rc<dyn StorageEventsPort> {
    Rc::new(wasm::WindowStorageEvents::new())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage_events() -> Rc<dyn StorageEventsPort> {
    Rc::new(native::NoopStorageEvents::new())
}

#[cfg(target_arch = "wasm32")]
pub fn default_scheduler() -> Rc<dyn SchedulerPort> {
    Rc::new(wasm::TimeoutScheduler::new())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_scheduler() -> Rc<dyn SchedulerPort> {
    Rc::new(native::EventLoop::current())
}
