use crate::domain::bridge::error::BridgeError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Storage, Window};

/// The page's window. Storage events and `localStorage` only exist there, not
/// in worker scopes.
pub fn window() -> Result<Window, BridgeError> {
    js_sys::global()
        .dyn_into::<Window>()
        .map_err(|_| BridgeError::storage_unavailable("No Window in this global scope"))
}

pub fn local_storage() -> Result<Storage, BridgeError> {
    window()?
        .local_storage()
        .map_err(|e| BridgeError::storage_unavailable(js_error_message(&e)))?
        .ok_or_else(|| BridgeError::storage_unavailable("localStorage is not available"))
}

pub fn session_storage() -> Option<Storage> {
    window().ok()?.session_storage().ok().flatten()
}

/// Best-effort text of a thrown JavaScript value (string, `Error` or
/// `DOMException`).
pub fn js_error_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| format!("{}: {}", String::from(e.name()), String::from(e.message())))
        })
        .unwrap_or_else(|| "Unknown JavaScript error".to_string())
}
