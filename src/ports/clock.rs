/// Millisecond clock backing the `time_it!` measurements.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> f64;

    /// False when the host exposes no high-resolution timer.
    fn is_available(&self) -> bool;
}
