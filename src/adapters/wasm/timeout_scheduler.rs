use crate::ports::{SchedulerPort, Task};
use gloo_timers::callback::Timeout;

/// Defers tasks with a zero-delay timer, i.e. behind everything already queued
/// on the browser's task queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl TimeoutScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulerPort for TimeoutScheduler {
    fn defer(&self, task: Task) {
        Timeout::new(0, task).forget();
    }
}
