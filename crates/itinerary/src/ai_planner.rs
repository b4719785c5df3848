//! Request lifecycle of the AI planner panel.
//!
//! Generation runs outside the session. The planner hands out a ticket per
//! submission and only accepts the result carrying the outstanding ticket
//! while the panel is open; anything else is discarded.

use foundation::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::preferences::TravelPreferences;
use crate::recommendation::{Recommendation, RecommendationError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AiPlannerState {
    Preferences {
        last_error: Option<String>,
    },
    Generating {
        ticket: RequestTicket,
        preferences: TravelPreferences,
    },
    Ready {
        recommendation: Recommendation,
    },
}

/// Outcome of delivering a generation result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The recommendation is now shown.
    Applied,
    /// Generation failed; the panel is back on the preferences form.
    Failed,
    /// The ticket was superseded or never issued.
    Stale,
    /// The panel was closed before the result arrived.
    Closed,
}

#[derive(Debug, Clone)]
pub struct AiPlanner {
    state: AiPlannerState,
    open: bool,
    next_ticket: u64,
}

impl Default for AiPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlanner {
    pub fn new() -> Self {
        Self {
            state: AiPlannerState::Preferences { last_error: None },
            open: false,
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> &AiPlannerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.state, AiPlannerState::Generating { .. })
    }

    pub fn outstanding(&self) -> Option<RequestTicket> {
        match &self.state {
            AiPlannerState::Generating { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        match &self.state {
            AiPlannerState::Ready { recommendation } => Some(recommendation),
            _ => None,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the panel. An outstanding request is abandoned.
    pub fn close(&mut self) {
        self.open = false;
        if let AiPlannerState::Generating { ticket, .. } = &self.state {
            debug!(ticket = ticket.0, "abandoning outstanding request");
            self.state = AiPlannerState::Preferences { last_error: None };
        }
    }

    /// Validates `preferences` and issues a new ticket, superseding any
    /// request still in flight.
    pub fn submit(&mut self, preferences: TravelPreferences) -> PlannerResult<RequestTicket> {
        if !self.open {
            return Err(PlannerError::validation("the AI planner is closed"));
        }
        preferences.validate()?;

        let ticket = RequestTicket(self.next_ticket);
        self.next_ticket += 1;
        if let Some(old) = self.outstanding() {
            debug!(old = old.0, new = ticket.0, "superseding request");
        }
        self.state = AiPlannerState::Generating {
            ticket,
            preferences,
        };
        Ok(ticket)
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Recommendation, RecommendationError>,
    ) -> Completion {
        if !self.open {
            warn!(ticket = ticket.0, "discarding result for closed planner");
            return Completion::Closed;
        }
        if self.outstanding() != Some(ticket) {
            warn!(ticket = ticket.0, "discarding stale result");
            return Completion::Stale;
        }

        match result {
            Ok(recommendation) => {
                self.state = AiPlannerState::Ready { recommendation };
                Completion::Applied
            }
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "generation failed");
                self.state = AiPlannerState::Preferences {
                    last_error: Some(err.message),
                };
                Completion::Failed
            }
        }
    }

    /// Leaves a shown recommendation to edit the preferences again.
    pub fn back_to_preferences(&mut self) {
        if !self.is_generating() {
            self.state = AiPlannerState::Preferences { last_error: None };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AiPlanner, AiPlannerState, Completion, RequestTicket};
    use crate::preferences::TravelPreferences;
    use crate::recommendation::{RecommendationError, sample_japan_plan};

    fn open_planner() -> AiPlanner {
        let mut p = AiPlanner::new();
        p.open();
        p
    }

    #[test]
    fn submit_then_complete_shows_recommendation() {
        let mut p = open_planner();
        let t = p.submit(TravelPreferences::default()).unwrap();
        assert!(p.is_generating());
        assert_eq!(p.complete(t, Ok(sample_japan_plan())), Completion::Applied);
        assert_eq!(p.recommendation(), Some(&sample_japan_plan()));
    }

    #[test]
    fn resubmission_makes_first_ticket_stale() {
        let mut p = open_planner();
        let first = p.submit(TravelPreferences::default()).unwrap();
        let second = p.submit(TravelPreferences::default()).unwrap();
        assert_ne!(first, second);

        assert_eq!(p.complete(first, Ok(sample_japan_plan())), Completion::Stale);
        assert!(p.is_generating());
        assert_eq!(p.complete(second, Ok(sample_japan_plan())), Completion::Applied);
    }

    #[test]
    fn late_result_after_close_is_discarded() {
        let mut p = open_planner();
        let t = p.submit(TravelPreferences::default()).unwrap();
        p.close();
        assert_eq!(p.complete(t, Ok(sample_japan_plan())), Completion::Closed);
        assert!(p.recommendation().is_none());

        // Reopening does not revive the abandoned ticket.
        p.open();
        assert_eq!(p.complete(t, Ok(sample_japan_plan())), Completion::Stale);
    }

    #[test]
    fn failure_returns_to_preferences_with_message() {
        let mut p = open_planner();
        let t = p.submit(TravelPreferences::default()).unwrap();
        assert_eq!(
            p.complete(t, Err(RecommendationError::new("quota exhausted"))),
            Completion::Failed
        );
        assert_eq!(
            p.state(),
            &AiPlannerState::Preferences {
                last_error: Some("quota exhausted".to_string())
            }
        );
    }

    #[test]
    fn invalid_or_closed_submissions_are_rejected() {
        let mut closed = AiPlanner::new();
        assert!(closed.submit(TravelPreferences::default()).is_err());

        let mut p = open_planner();
        let bad = TravelPreferences {
            budget: 5,
            ..TravelPreferences::default()
        };
        assert!(p.submit(bad).is_err());
        assert!(!p.is_generating());
        assert_eq!(
            p.complete(RequestTicket(42), Ok(sample_japan_plan())),
            Completion::Stale
        );
    }
}
