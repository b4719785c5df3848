use std::time::Duration;

/// Handle returned when a periodic task is scheduled. Used to cancel it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(pub u64);

/// A recurring unit of work fired by the [`crate::PeriodicScheduler`].
///
/// Tasks carry no callback: the owner of the scheduler maps each firing back
/// to the state it mutates. Firings in the same advance run in a stable order
/// based on `(priority, name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicTask {
    pub name: &'static str,
    /// Smaller values fire earlier.
    pub priority: i32,
    pub period: Duration,
}

impl PeriodicTask {
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            priority: 0,
            period,
        }
    }

    pub fn with_priority(name: &'static str, priority: i32, period: Duration) -> Self {
        Self {
            name,
            priority,
            period,
        }
    }
}

/// One task's share of an advance: how many whole periods elapsed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TaskFiring {
    pub handle: TaskHandle,
    pub name: &'static str,
    pub ticks: u64,
}
