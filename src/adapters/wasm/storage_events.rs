use crate::adapters::logger;
use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::subscription::Subscription;
use crate::domain::bridge::types::{PersistedValue, StorageArea, StorageChange};
use crate::global::{js_error_message, session_storage, window};
use crate::ports::{StorageEventsPort, StorageListener};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Storage, StorageEvent};

const STORAGE_EVENT: &str = "storage";

/// Window `storage` events. The browser only fires them in contexts other
/// than the one that wrote.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowStorageEvents;

impl WindowStorageEvents {
    pub fn new() -> Self {
        Self
    }
}

fn classify(area: Option<Storage>, local: Option<&Storage>, session: Option<&Storage>) -> StorageArea {
    let Some(area) = area else {
        return StorageArea::Other;
    };
    let same = |candidate: Option<&Storage>| {
        candidate.is_some_and(|c| js_sys::Object::is(area.as_ref(), c.as_ref()))
    };

    if same(local) {
        StorageArea::Local
    } else if same(session) {
        StorageArea::Session
    } else {
        StorageArea::Other
    }
}

impl StorageEventsPort for WindowStorageEvents {
    fn subscribe(&self, listener: StorageListener) -> Result<Subscription, BridgeError> {
        let window = window().map_err(|e| BridgeError::listener_registration(e.to_string()))?;
        let local = window.local_storage().ok().flatten();
        let session = session_storage();

        let closure = Closure::wrap(Box::new(move |event: StorageEvent| {
            let change = StorageChange {
                area: classify(event.storage_area(), local.as_ref(), session.as_ref()),
                key: event.key(),
                new_value: event.new_value().map(PersistedValue::from),
            };
            listener(&change);
        }) as Box<dyn FnMut(StorageEvent)>);

        window
            .add_event_listener_with_callback(STORAGE_EVENT, closure.as_ref().unchecked_ref())
            .map_err(|e| BridgeError::listener_registration(js_error_message(&e)))?;

        Ok(Subscription::new(move || {
            if let Err(e) = window
                .remove_event_listener_with_callback(STORAGE_EVENT, closure.as_ref().unchecked_ref())
            {
                logger().warn(&format!(
                    "Failed to remove storage listener: {}",
                    js_error_message(&e)
                ));
            }
        }))
    }
}
