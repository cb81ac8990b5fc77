//! Single-shot timer scheduling for overlay auto-close.
//!
//! Schedulers never run a task inline from `schedule`; the task always runs
//! later, on whatever thread or task drives the scheduler.

use crate::error::StoreError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Cancels a scheduled task when told to. Dropping it does not cancel.
pub struct TimerHandle {
    cancel: Box<dyn FnOnce() + Send + 'static>,
}

impl TimerHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Box::new(cancel),
        }
    }

    pub fn cancel(self) {
        (self.cancel)()
    }
}

pub trait TimerScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: TimerTask) -> Result<TimerHandle, StoreError>;
}

/// Schedules tasks on a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    handle: Option<Handle>,
}

impl TokioScheduler {
    /// Use whichever runtime is current at scheduling time.
    pub fn current() -> Self {
        Self { handle: None }
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }
}

impl TimerScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> Result<TimerHandle, StoreError> {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => Handle::try_current().map_err(|_| StoreError::NoRuntime)?,
        };
        let join = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Ok(TimerHandle::new(move || join.abort()))
    }
}

struct PendingTask {
    id: u64,
    due: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Deterministic scheduler driven by explicit [`ManualScheduler::advance`]
/// calls. Useful for hosts with their own event loop, and for tests.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward, running every task that falls due in
    /// due-time order. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.lock().now + by;
        let mut ran = 0;
        loop {
            // Take one task at a time so tasks may schedule or cancel others.
            let next = {
                let mut clock = self.clock.lock();
                let position = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.id))
                    .map(|(i, _)| i);
                match position {
                    Some(i) => {
                        let task = clock.pending.remove(i);
                        clock.now = task.due;
                        Some(task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match next {
                Some(pending) => {
                    (pending.task)();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.clock.lock().pending.len()
    }

    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> Result<TimerHandle, StoreError> {
        let mut clock = self.clock.lock();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.pending.push(PendingTask { id, due, task });

        let weak = Arc::downgrade(&self.clock);
        Ok(TimerHandle::new(move || {
            if let Some(clock) = weak.upgrade() {
                clock.lock().pending.retain(|p| p.id != id);
            }
        }))
    }
}
