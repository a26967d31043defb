use super::converters::{
    app_port, config_from_js, js_to_persisted, persisted_to_js, port_method, to_js_error,
};
use crate::adapters::logger;
use crate::config::BridgeConfig;
use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::subscription::StoreChannel;
use crate::domain::bridge::sync::SyncBridge;
use crate::domain::bridge::types::PersistedValue;
use crate::global::js_error_message;
use crate::measure::set_debug_mode;
use crate::platform::Platform;
use crate::ports::ApplicationPort;
use js_sys::Function;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// A JavaScript application exposing `ports` objects: an outbound port with
/// `subscribe`/`unsubscribe` and an inbound port with `send`.
struct JsApplication {
    store_cache: StoreChannel,
    outbound: JsValue,
    callback: Closure<dyn FnMut(JsValue)>,
    inbound: JsValue,
    send: Function,
    error_port: Option<(JsValue, Function)>,
    connected: Cell<bool>,
}

impl JsApplication {
    fn connect(app: &JsValue, config: &BridgeConfig) -> Result<Self, BridgeError> {
        let outbound = app_port(app, &config.outbound_port)?;
        let subscribe = port_method(&outbound, &["subscribe"]).ok_or_else(|| {
            BridgeError::listener_registration(format!(
                "Port '{}' has no subscribe function",
                config.outbound_port
            ))
        })?;

        let inbound = app_port(app, &config.inbound_port)?;
        let send = port_method(&inbound, &["send", "sendMessage"]).ok_or_else(|| {
            BridgeError::listener_registration(format!(
                "Port '{}' has no send function",
                config.inbound_port
            ))
        })?;

        let error_port = config.error_port.as_deref().and_then(|name| {
            let port = app_port(app, name).ok()?;
            let send = port_method(&port, &["send", "sendMessage"])?;
            Some((port, send))
        });

        let store_cache = StoreChannel::new();
        let channel = store_cache.clone();
        let callback = Closure::wrap(Box::new(move |value: JsValue| {
            match js_to_persisted(&value) {
                Ok(value) => channel.emit(&value),
                Err(e) => logger().error(&format!("Dropping unserializable store value: {e}")),
            }
        }) as Box<dyn FnMut(JsValue)>);

        subscribe
            .call1(&outbound, callback.as_ref())
            .map_err(|e| BridgeError::listener_registration(js_error_message(&e)))?;

        Ok(Self {
            store_cache,
            outbound,
            callback,
            inbound,
            send,
            error_port,
            connected: Cell::new(true),
        })
    }

    fn disconnect(&self) {
        if !self.connected.replace(false) {
            return;
        }
        if let Some(unsubscribe) = port_method(&self.outbound, &["unsubscribe"]) {
            if let Err(e) = unsubscribe.call1(&self.outbound, self.callback.as_ref()) {
                logger().warn(&format!(
                    "Failed to unsubscribe from application port: {}",
                    js_error_message(&e)
                ));
            }
        }
    }
}

impl Drop for JsApplication {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl ApplicationPort for JsApplication {
    fn store_cache(&self) -> &StoreChannel {
        &self.store_cache
    }

    fn notify_store_change(&self, value: Option<PersistedValue>) {
        if let Err(e) = self.send.call1(&self.inbound, &persisted_to_js(value.as_ref())) {
            logger().error(&format!(
                "Application rejected store change: {}",
                js_error_message(&e)
            ));
        }
    }

    fn persistence_unavailable(&self, error: &BridgeError) {
        if let Some((port, send)) = &self.error_port {
            if let Err(e) = send.call1(port, &JsValue::from_str(&error.to_string())) {
                logger().error(&format!(
                    "Application rejected persistence error: {}",
                    js_error_message(&e)
                ));
            }
        }
    }
}

/// JavaScript entry point wiring an application to `localStorage`.
///
/// ```js
/// const bridge = new StoreBridge({ storageKey: "store" });
/// const app = Elm.Main.init({ flags: bridge.flags() });
/// bridge.attach(app);
/// ```
#[wasm_bindgen]
pub struct StoreBridge {
    config: BridgeConfig,
    bridge: SyncBridge,
    app: Option<Rc<JsApplication>>,
}

#[wasm_bindgen]
impl StoreBridge {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<StoreBridge, JsValue> {
        let config = config_from_js(config)?;
        if config.debug {
            set_debug_mode(true);
        }
        let key = config.storage_key()?;
        let bridge = SyncBridge::new(Platform::from_config(&config), key);

        Ok(StoreBridge {
            config,
            bridge,
            app: None,
        })
    }

    /// Reads the persisted value once, returning a string or `null`.
    pub fn flags(&mut self) -> Result<JsValue, JsValue> {
        let flags = self.bridge.bootstrap()?;
        Ok(persisted_to_js(flags.as_ref()))
    }

    /// Connects to the application's ports and starts relaying.
    pub fn attach(&mut self, app: JsValue) -> Result<(), JsValue> {
        let app = Rc::new(JsApplication::connect(&app, &self.config).map_err(to_js_error)?);
        self.bridge.attach(app.clone())?;
        self.app = Some(app);
        Ok(())
    }

    /// Stops relaying in both directions.
    pub fn detach(&mut self) {
        self.bridge.detach();
        if let Some(app) = self.app.take() {
            app.disconnect();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.bridge.state().name().to_string()
    }

    #[wasm_bindgen(getter, js_name = storageKey)]
    pub fn storage_key(&self) -> String {
        self.bridge.key().to_string()
    }
}
