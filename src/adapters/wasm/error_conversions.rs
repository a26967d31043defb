use crate::domain::bridge::error::BridgeError;
use wasm_bindgen::JsValue;

/// Conversion from BridgeError to JsValue for the WASM boundary
impl From<BridgeError> for JsValue {
    fn from(error: BridgeError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
