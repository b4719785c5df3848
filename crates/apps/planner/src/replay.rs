use serde::Serialize;
use tracing::warn;

use crate::command::Command;
use crate::events::PlannerEvent;
use crate::session::Planner;
use crate::snapshot::PlannerSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub command: String,
    pub kind: &'static str,
    pub error: String,
}

/// Result of running a command script against a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<Rejection>,
    pub events: Vec<PlannerEvent>,
    pub snapshot: PlannerSnapshot,
}

/// Applies `commands` in order. A rejected command leaves the session
/// unchanged; with `stop_on_error` the script ends there.
pub fn replay(
    planner: &mut Planner,
    commands: Vec<Command>,
    stop_on_error: bool,
) -> ReplayReport {
    let mut applied = 0;
    let mut rejected = Vec::new();
    for (index, command) in commands.into_iter().enumerate() {
        let name = command.name();
        match planner.apply(command) {
            Ok(()) => applied += 1,
            Err(err) => {
                warn!(index, command = %name, error = %err, "command rejected");
                rejected.push(Rejection {
                    index,
                    command: name,
                    kind: err.kind(),
                    error: err.to_string(),
                });
                if stop_on_error {
                    break;
                }
            }
        }
    }
    let events = planner.drain_events().into_iter().map(|r| r.event).collect();
    ReplayReport {
        applied,
        rejected,
        events,
        snapshot: planner.snapshot(),
    }
}
