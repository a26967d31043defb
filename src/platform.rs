/// Platform - Dependency injection container for all ports.
///
/// Hybrid approach:
/// - Stateless, process-wide ports: `&'static` references
/// - Per-context ports: `Rc<dyn Trait>`, swappable for tests and other hosts
use crate::adapters;
use crate::config::BridgeConfig;
use crate::ports::{ClockPort, KeyValueStoragePort, LoggerPort, SchedulerPort, StorageEventsPort};
use std::rc::Rc;

#[derive(Clone)]
pub struct Platform {
    logger: &'static dyn LoggerPort,
    clock: &'static dyn ClockPort,
    storage: Rc<dyn KeyValueStoragePort>,
    storage_events: Rc<dyn StorageEventsPort>,
    scheduler: Rc<dyn SchedulerPort>,
}

impl Platform {
    /// Creates a new Platform with default adapters for the current target.
    pub fn new() -> Self {
        Self::from_config(&BridgeConfig::default())
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            logger: adapters::logger(),
            clock: adapters::clock(),
            storage: adapters::default_storage(config),
            storage_events: adapters::default_storage_events(),
            scheduler: adapters::default_scheduler(),
        }
    }

    pub fn with_storage(mut self, storage: Rc<dyn KeyValueStoragePort>) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_storage_events(mut self, storage_events: Rc<dyn StorageEventsPort>) -> Self {
        self.storage_events = storage_events;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Rc<dyn SchedulerPort>) -> Self {
        self.scheduler = scheduler;
        self
    }

    #[inline]
    pub fn logger(&self) -> &'static dyn LoggerPort {
        self.logger
    }

    #[inline]
    pub fn clock(&self) -> &'static dyn ClockPort {
        self.clock
    }

    #[inline]
    pub fn storage(&self) -> &dyn KeyValueStoragePort {
        self.storage.as_ref()
    }

    #[inline]
    pub fn storage_events(&self) -> &dyn StorageEventsPort {
        self.storage_events.as_ref()
    }

    #[inline]
    pub fn scheduler(&self) -> &dyn SchedulerPort {
        self.scheduler.as_ref()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}
