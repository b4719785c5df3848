use foundation::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};

pub const MIN_BUDGET: u32 = 100;
pub const MAX_BUDGET: u32 = 10_000;
pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;

/// What the traveller asked the recommendation generator for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPreferences {
    pub travel_style: String,
    pub activities: String,
    pub cuisine: String,
    pub budget: u32,
    pub duration_days: u32,
}

impl Default for TravelPreferences {
    fn default() -> Self {
        Self {
            travel_style: "adventure".to_string(),
            activities: "sightseeing".to_string(),
            cuisine: "local".to_string(),
            budget: 2000,
            duration_days: 7,
        }
    }
}

impl TravelPreferences {
    pub fn validate(&self) -> PlannerResult<()> {
        for (field, value) in [
            ("travel_style", &self.travel_style),
            ("activities", &self.activities),
            ("cuisine", &self.cuisine),
        ] {
            if value.trim().is_empty() {
                return Err(PlannerError::validation(format!("{field} is required")));
            }
        }
        if !(MIN_BUDGET..=MAX_BUDGET).contains(&self.budget) {
            return Err(PlannerError::validation(format!(
                "budget {} outside [{MIN_BUDGET}, {MAX_BUDGET}]",
                self.budget
            )));
        }
        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(PlannerError::validation(format!(
                "duration {} outside [{MIN_DURATION_DAYS}, {MAX_DURATION_DAYS}] days",
                self.duration_days
            )));
        }
        Ok(())
    }
}
