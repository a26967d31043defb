/// Ports module - the interfaces between the bridge and its collaborators.
///
/// Storage, storage events and scheduling are single-threaded per execution
/// context and carry no `Send` bound; logging and the clock are process-wide.

pub mod application;
pub mod clock;
pub mod logger;
pub mod scheduler;
pub mod storage;
pub mod storage_events;

pub use application::ApplicationPort;
pub use clock::ClockPort;
pub use logger::LoggerPort;
pub use scheduler::{SchedulerPort, Task};
pub use storage::KeyValueStoragePort;
pub use storage_events::{StorageEventsPort, StorageListener};
