/// WASM adapters - implementations using browser APIs.

pub mod clock;
pub mod console_logger;
pub mod error_conversions;
pub mod local_storage;
pub mod storage_events;
pub mod timeout_scheduler;

pub use clock::Clock;
pub use console_logger::ConsoleLogger;
pub use local_storage::LocalStorage;
pub use storage_events::WindowStorageEvents;
pub use timeout_scheduler::TimeoutScheduler;
