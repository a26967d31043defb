use crate::config::BridgeConfig;
use crate::domain::bridge::error::BridgeError;
use crate::domain::bridge::types::PersistedValue;
use crate::global::js_error_message;
use js_sys::{Function, Reflect};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub fn to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// `undefined` or `null` yields the defaults.
pub fn config_from_js(value: JsValue) -> Result<BridgeConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(BridgeConfig::default());
    }
    from_value(value).map_err(to_js_error)
}

/// Every value, strings included, is `JSON.stringify`-ed so the stored flags
/// always parse as JSON. `null`/`undefined` means "cleared".
pub fn js_to_persisted(value: &JsValue) -> Result<Option<PersistedValue>, BridgeError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }

    let json = js_sys::JSON::stringify(value)
        .map_err(|e| BridgeError::serialization_error(js_error_message(&e)))?;
    json.as_string()
        .map(|raw| Some(PersistedValue::from(raw)))
        .ok_or_else(|| BridgeError::serialization_error("Value cannot be serialized to JSON"))
}

pub fn persisted_to_js(value: Option<&PersistedValue>) -> JsValue {
    value
        .map(|v| JsValue::from_str(v.as_str()))
        .unwrap_or(JsValue::NULL)
}

/// `app.ports[name]`.
pub fn app_port(app: &JsValue, name: &str) -> Result<JsValue, BridgeError> {
    let ports = Reflect::get(app, &JsValue::from_str("ports"))
        .map_err(|e| BridgeError::listener_registration(js_error_message(&e)))?;
    if ports.is_undefined() || ports.is_null() {
        return Err(BridgeError::listener_registration(
            "Application exposes no ports",
        ));
    }

    let port = Reflect::get(&ports, &JsValue::from_str(name))
        .map_err(|e| BridgeError::listener_registration(js_error_message(&e)))?;
    if port.is_undefined() || port.is_null() {
        return Err(BridgeError::listener_registration(format!(
            "Application has no port named '{name}'"
        )));
    }
    Ok(port)
}

/// First function found on `port` among `names`.
pub fn port_method(port: &JsValue, names: &[&str]) -> Option<Function> {
    names.iter().find_map(|name| {
        Reflect::get(port, &JsValue::from_str(name))
            .ok()
            .and_then(|method| method.dyn_into::<Function>().ok())
    })
}
