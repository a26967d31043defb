pub type Task = Box<dyn FnOnce()>;

/// Port for deferring work to the next cooperative scheduling tick.
pub trait SchedulerPort {
    /// Queues `task` behind everything already scheduled. Must never run it
    /// before returning.
    fn defer(&self, task: Task);
}
