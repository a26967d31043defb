use super::bootstrap;
use super::error::BridgeError;
use super::operations;
use super::subscription::Subscription;
use super::types::{BridgeState, PersistedValue, StorageChange, StorageKey};
use crate::measure::is_debug;
use crate::platform::Platform;
use crate::ports::ApplicationPort;
use once_cell::unsync::OnceCell;
use std::rc::{Rc, Weak};

struct Shared {
    platform: Platform,
    key: StorageKey,
    app: OnceCell<Rc<dyn ApplicationPort>>,
}

impl Shared {
    fn on_local_change(self: &Rc<Self>, value: Option<PersistedValue>) {
        let logger = self.platform.logger();

        match operations::persist(&self.platform, &self.key, value.as_ref()) {
            Ok(()) => {
                if is_debug() {
                    match &value {
                        Some(v) => logger.log(&format!("Stored '{}' ({} bytes)", self.key, v.len())),
                        None => logger.log(&format!("Cleared '{}'", self.key)),
                    }
                }
                self.defer(move |app| app.notify_store_change(value));
            }
            Err(error) => {
                logger.error(&format!("Failed to persist '{}': {error}", self.key));
                self.defer(move |app| app.persistence_unavailable(&error));
            }
        }
    }

    fn on_storage_change(&self, change: &StorageChange) {
        if !change.concerns(&self.key) {
            if is_debug() {
                self.platform.logger().log(&format!(
                    "Ignoring {:?} change to {:?}",
                    change.area, change.key
                ));
            }
            return;
        }

        if let Some(app) = self.app.get() {
            self.platform
                .logger()
                .log(&format!("'{}' changed in another context", self.key));
            app.notify_store_change(change.new_value.clone());
        }
    }

    /// Runs `deliver` against the application on the next scheduler tick,
    /// unless the bridge is gone by then.
    fn defer(self: &Rc<Self>, deliver: impl FnOnce(&dyn ApplicationPort) + 'static) {
        let shared = Rc::downgrade(self);
        self.platform.scheduler().defer(Box::new(move || {
            if let Some(app) = shared.upgrade().and_then(|s| s.app.get().cloned()) {
                deliver(app.as_ref());
            }
        }));
    }
}

/// Relays the application's persisted state to storage and back.
///
/// Lifecycle: `Uninitialized -> Bootstrapping -> Active -> Detached`.
/// `bootstrap` reads the initial value exactly once; `attach` wires both
/// directions and `detach` tears them down for good.
pub struct SyncBridge {
    shared: Rc<Shared>,
    state: BridgeState,
    subscriptions: Vec<Subscription>,
}

impl SyncBridge {
    pub fn new(platform: Platform, key: StorageKey) -> Self {
        Self {
            shared: Rc::new(Shared {
                platform,
                key,
                app: OnceCell::new(),
            }),
            state: BridgeState::Uninitialized,
            subscriptions: Vec::new(),
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn key(&self) -> &StorageKey {
        &self.shared.key
    }

    pub fn platform(&self) -> &Platform {
        &self.shared.platform
    }

    /// True while both directions are wired.
    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Reads the persisted value to hand to the application as its flags.
    pub fn bootstrap(&mut self) -> Result<Option<PersistedValue>, BridgeError> {
        self.transition(BridgeState::Uninitialized, BridgeState::Bootstrapping, "bootstrap")?;
        Ok(bootstrap::load(&self.shared.platform, &self.shared.key))
    }

    /// Subscribes to the application's outbound channel and to other-context
    /// storage changes.
    ///
    /// A platform without storage events leaves the bridge outbound-only.
    pub fn attach(&mut self, app: Rc<dyn ApplicationPort>) -> Result<(), BridgeError> {
        self.transition(BridgeState::Bootstrapping, BridgeState::Active, "attach")?;

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let outbound = app.store_cache().subscribe(move |value| {
            if let Some(shared) = weak.upgrade() {
                shared.on_local_change(value.clone());
            }
        });
        self.subscriptions.push(outbound);

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        match self
            .shared
            .platform
            .storage_events()
            .subscribe(Box::new(move |change: &StorageChange| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_storage_change(change);
                }
            })) {
            Ok(inbound) => self.subscriptions.push(inbound),
            Err(e) => self.shared.platform.logger().warn(&format!(
                "Changes from other contexts will not be relayed: {e}"
            )),
        }

        if self.shared.app.set(app).is_err() {
            self.shared
                .platform
                .logger()
                .warn("Application was already attached");
        }
        Ok(())
    }

    /// Persists a local change and schedules its acknowledgment.
    pub fn on_local_change(&self, value: Option<PersistedValue>) {
        if self.state != BridgeState::Active {
            self.ignore_inactive("local change");
            return;
        }
        self.shared.on_local_change(value);
    }

    /// Relays a platform storage change if it concerns this bridge's key.
    pub fn on_storage_change(&self, change: &StorageChange) {
        if self.state != BridgeState::Active {
            self.ignore_inactive("storage change");
            return;
        }
        self.shared.on_storage_change(change);
    }

    /// Stops listening in both directions and ignores direct calls from then
    /// on. Acknowledgments already scheduled are still delivered.
    pub fn detach(&mut self) {
        self.subscriptions.clear();
        self.state = BridgeState::Detached;
    }

    fn transition(
        &mut self,
        from: BridgeState,
        to: BridgeState,
        action: &'static str,
    ) -> Result<(), BridgeError> {
        if self.state != from {
            return Err(BridgeError::InvalidTransition {
                from: self.state.name(),
                action,
            });
        }
        self.state = to;
        Ok(())
    }

    fn ignore_inactive(&self, what: &str) {
        self.shared.platform.logger().warn(&format!(
            "Ignoring {what} while bridge is {}",
            self.state.name()
        ));
    }
}

/// Bootstraps, builds the application from the persisted flags and attaches
/// the bridge to it.
pub fn launch<A, F>(
    platform: Platform,
    key: StorageKey,
    init: F,
) -> Result<(Rc<A>, SyncBridge), BridgeError>
where
    A: ApplicationPort + 'static,
    F: FnOnce(Option<PersistedValue>) -> A,
{
    let mut bridge = SyncBridge::new(platform, key);
    let flags = bridge.bootstrap()?;
    let app = Rc::new(init(flags));
    bridge.attach(app.clone())?;
    Ok((app, bridge))
}
