use foundation::error::{PlannerError, PlannerResult};
use foundation::ids::PlaceId;
use serde::{Deserialize, Serialize};

/// A stop in the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: PlaceId,
    pub name: String,
    pub country: String,
    /// Planned length of stay, always at least one day.
    pub days: u32,
    /// Cover image reference (URL or asset key).
    pub image: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl Destination {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.id.as_str().is_empty() {
            return Err(PlannerError::validation("destination id is empty"));
        }
        if self.days == 0 {
            return Err(PlannerError::validation(format!(
                "destination {} must last at least one day",
                self.id
            )));
        }
        Ok(())
    }

    /// Builds a destination for a place picked on the globe.
    pub fn from_place(
        id: PlaceId,
        name: impl Into<String>,
        country: impl Into<String>,
        defaults: &DestinationDefaults,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
            days: defaults.days,
            image: defaults.image.clone(),
            activities: defaults.activities.clone(),
        }
    }
}

/// Values used when a destination is created from a bare globe location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationDefaults {
    pub days: u32,
    pub image: String,
    pub activities: Vec<String>,
}

impl Default for DestinationDefaults {
    fn default() -> Self {
        Self {
            days: 3,
            image: "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=400&q=80"
                .to_string(),
            activities: vec![
                "Explore the city".to_string(),
                "Visit local attractions".to_string(),
                "Try local cuisine".to_string(),
            ],
        }
    }
}
