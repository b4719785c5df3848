use std::time::Duration;

use tracing::debug;

use crate::task::{PeriodicTask, TaskFiring, TaskHandle};

/// Rejected schedule request: a task must have a non-zero period.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InvalidPeriod {
    pub name: &'static str,
}

impl std::fmt::Display for InvalidPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task {} needs a non-zero period", self.name)
    }
}

impl std::error::Error for InvalidPeriod {}

#[derive(Debug)]
struct Entry {
    handle: TaskHandle,
    task: PeriodicTask,
    /// Elapsed time not yet converted into whole ticks.
    carry_ns: u128,
}

/// Deterministic scheduler for cancellable periodic tasks.
///
/// Time is fed in explicitly through [`PeriodicScheduler::advance`], so the
/// scheduler never reads a clock. Elapsed time is kept in integer nanoseconds
/// per task; every whole period produces exactly one tick and the remainder is
/// carried into the next advance, so no tick is ever dropped however coarse
/// the advances are.
#[derive(Debug, Default)]
pub struct PeriodicScheduler {
    next_handle: u64,
    entries: Vec<Entry>,
}

impl PeriodicScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: PeriodicTask) -> Result<TaskHandle, InvalidPeriod> {
        if task.period.is_zero() {
            return Err(InvalidPeriod { name: task.name });
        }
        let handle = TaskHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        debug!(task = task.name, period_ms = task.period.as_millis() as u64, "task scheduled");
        self.entries.push(Entry {
            handle,
            task,
            carry_ns: 0,
        });
        // Keep (priority, name, insertion order) as the firing order.
        self.entries.sort_by(|a, b| {
            a.task
                .priority
                .cmp(&b.task.priority)
                .then_with(|| a.task.name.cmp(b.task.name))
                .then_with(|| a.handle.cmp(&b.handle))
        });
        Ok(handle)
    }

    /// Stops a task. Returns `false` if the handle was not active.
    ///
    /// A cancelled task never appears in a later [`advance`](Self::advance).
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        let removed = self.entries.len() != before;
        if removed {
            debug!(handle = handle.0, "task cancelled");
        }
        removed
    }

    pub fn cancel_all(&mut self) {
        if !self.entries.is_empty() {
            debug!(count = self.entries.len(), "cancelling all tasks");
        }
        self.entries.clear();
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn task_count(&self) -> usize {
        self.entries.len()
    }

    /// Feeds `elapsed` to every active task and reports those that completed
    /// at least one period, in firing order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TaskFiring> {
        let elapsed_ns = elapsed.as_nanos();
        let mut fired = Vec::new();
        for entry in &mut self.entries {
            let period_ns = entry.task.period.as_nanos();
            let total = entry.carry_ns + elapsed_ns;
            let ticks = total / period_ns;
            entry.carry_ns = total % period_ns;
            if ticks > 0 {
                fired.push(TaskFiring {
                    handle: entry.handle,
                    name: entry.task.name,
                    ticks: u64::try_from(ticks).unwrap_or(u64::MAX),
                });
            }
        }
        fired
    }
}
