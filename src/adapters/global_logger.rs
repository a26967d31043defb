/// Global logger instance - automatically selects implementation based on build target.
///
/// WASM logs to the browser console, native forwards to the `log` facade.
use crate::ports::LoggerPort;
use once_cell::sync::Lazy;

#[cfg(not(target_arch = "wasm32"))]
use crate::adapters::native::ConsoleLogger;
#[cfg(target_arch = "wasm32")]
use crate::adapters::wasm::ConsoleLogger;

static LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

/// Get the global logger instance.
#[inline]
pub fn logger() -> &'static dyn LoggerPort {
    &*LOGGER
}
