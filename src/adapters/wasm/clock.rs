use crate::global::window;
use crate::ports::ClockPort;
use web_sys::Performance;

#[derive(Clone, Copy, Default)]
pub struct Clock;

impl Clock {
    pub fn new() -> Self {
        Self
    }

    fn performance(&self) -> Option<Performance> {
        window().ok()?.performance()
    }
}

impl ClockPort for Clock {
    fn now(&self) -> f64 {
        self.performance().map(|perf| perf.now()).unwrap_or(0.0)
    }

    fn is_available(&self) -> bool {
        self.performance().is_some()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_clock_available_in_browser() {
        let clock = Clock::new();
        assert!(clock.is_available());
        let t1 = clock.now();
        assert!(clock.now() >= t1);
    }
}
