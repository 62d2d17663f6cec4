//! Single-slot task register
//!
//! Holds at most one pending deferred task. Scheduling a new task aborts the
//! previous one and stores the new handle under the same lock, so there is
//! never a moment with two live chains.

use std::future::Future;
use std::sync::Mutex;
use tokio::task::JoinHandle;

pub struct Scheduler {
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Replace whatever is pending with `task`
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.slot.lock().unwrap();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(tokio::spawn(task));
    }

    /// Drop the pending task, if any
    pub fn cancel(&self) {
        if let Some(previous) = self.slot.lock().unwrap().take() {
            previous.abort();
        }
    }

    /// True while a task is stored and has not finished
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
