use crate::ports::ClockPort;
use once_cell::sync::Lazy;

#[cfg(not(target_arch = "wasm32"))]
use crate::adapters::native::Clock;
#[cfg(target_arch = "wasm32")]
use crate::adapters::wasm::Clock;

static CLOCK: Lazy<Clock> = Lazy::new(Clock::new);

/// Returns a reference to the global clock instance
pub fn clock() -> &'static dyn ClockPort {
    &*CLOCK
}
