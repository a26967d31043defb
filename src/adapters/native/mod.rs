/// Native adapters - implementations for native Rust (non-WASM).

pub mod clock;
pub mod console_logger;
pub mod event_loop;
pub mod fs_storage;
pub mod memory_storage;
pub mod storage_events;

pub use clock::Clock;
pub use console_logger::ConsoleLogger;
pub use event_loop::EventLoop;
pub use fs_storage::FsStorage;
pub use memory_storage::{MemoryContext, MemoryOrigin};
pub use storage_events::NoopStorageEvents;
