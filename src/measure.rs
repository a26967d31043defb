use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;

pub static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen]
pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::SeqCst);
}

pub fn is_debug() -> bool {
    DEBUG_MODE.load(Ordering::SeqCst)
}

/// Wraps `$block` in a `time`/`time_end` pair on the platform logger when
/// debug mode is on.
#[macro_export]
macro_rules! time_it {
    ($platform:expr, $label:expr, $block:expr) => {{
        let timed = $crate::measure::is_debug() && $platform.clock().is_available();
        if timed {
            $platform.logger().time($label);
        }
        let result = $block;
        if timed {
            $platform.logger().time_end($label);
        }
        result
    }};
}

pub use crate::time_it;
