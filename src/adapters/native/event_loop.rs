use crate::ports::{SchedulerPort, Task};
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use std::cell::RefCell;
use std::rc::Rc;

/// Cooperative FIFO task queue for native hosts.
///
/// Deferred tasks run only when the host drives the loop with
/// `run_until_idle`, which is the native counterpart of the browser returning
/// to its event loop. Clones share the same queue.
#[derive(Clone)]
pub struct EventLoop {
    sender: UnboundedSender<Task>,
    receiver: Rc<RefCell<UnboundedReceiver<Task>>>,
}

thread_local! {
    static CURRENT: EventLoop = EventLoop::new();
}

impl EventLoop {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver: Rc::new(RefCell::new(receiver)),
        }
    }

    /// The loop used by `Platform::new()` on this thread.
    pub fn current() -> Self {
        CURRENT.with(EventLoop::clone)
    }

    /// Runs queued tasks, including ones they schedule, until the queue is
    /// empty. Returns how many ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = match self.receiver.try_borrow_mut() {
                Ok(mut receiver) => receiver.try_recv(),
                Err(_) => return ran,
            };
            match next {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(_) => return ran,
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerPort for EventLoop {
    fn defer(&self, task: Task) {
        if self.sender.unbounded_send(task).is_err() {
            crate::adapters::logger().error("Event loop is closed, dropping deferred task");
        }
    }
}
