use std::path::Path;

use foundation::error::PlannerError;
use foundation::math::{DEFAULT_GLOBE_RADIUS, GeoCoord};
use globe::{CameraSettings, DragSensitivity, Location};
use itinerary::{Destination, DestinationDefaults, RemovalPolicy};
use serde::{Deserialize, Serialize};

use crate::carousel::{DEFAULT_CAROUSEL_INTERVAL_MS, Photo, sample_photos};

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(PlannerError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config read failed: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse failed: {msg}"),
            ConfigError::Invalid(err) => write!(f, "config invalid: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<PlannerError> for ConfigError {
    fn from(err: PlannerError) -> Self {
        ConfigError::Invalid(err)
    }
}

/// Everything a planner session is built from.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub camera: CameraSettings,
    pub drag_sensitivity: DragSensitivity,
    pub globe_radius: f64,
    pub removal_policy: RemovalPolicy,
    pub destination_defaults: DestinationDefaults,
    pub carousel_interval_ms: u64,
    pub carousel_auto_play: bool,
    pub photos: Vec<Photo>,
    pub locations: Vec<Location>,
    pub destinations: Vec<Destination>,
    /// Simulated generation latency used by the demo CLI.
    pub recommendation_delay_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            drag_sensitivity: DragSensitivity::default(),
            globe_radius: DEFAULT_GLOBE_RADIUS,
            removal_policy: RemovalPolicy::default(),
            destination_defaults: DestinationDefaults::default(),
            carousel_interval_ms: DEFAULT_CAROUSEL_INTERVAL_MS,
            carousel_auto_play: true,
            photos: sample_photos(),
            locations: seed_locations(),
            destinations: seed_destinations(),
            recommendation_delay_ms: 1500,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Checks values serde cannot. Seed collections are checked again when
    /// the session builds its location set and itinerary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        if !(self.globe_radius.is_finite() && self.globe_radius > 0.0) {
            return Err(PlannerError::validation(format!(
                "globe radius {} must be positive",
                self.globe_radius
            ))
            .into());
        }
        if self.carousel_interval_ms == 0 {
            return Err(PlannerError::validation("carousel interval must be positive").into());
        }
        if self.destination_defaults.days == 0 {
            return Err(
                PlannerError::validation("default destination length must be positive").into(),
            );
        }
        let s = self.drag_sensitivity;
        if !(s.tilt_deg_per_px.is_finite() && s.spin_deg_per_px.is_finite()) {
            return Err(PlannerError::validation("drag sensitivity must be finite").into());
        }
        Ok(())
    }
}

fn seed_location(id: &str, name: &str, country: &str, lat: f64, lon: f64) -> Location {
    let coordinates = GeoCoord::new(lat, lon);
    debug_assert!(
        coordinates.is_ok(),
        "seed {id} has an out-of-range coordinate ({lat}, {lon})"
    );
    Location::new(id, name, country, coordinates.unwrap_or_default())
}

pub fn seed_locations() -> Vec<Location> {
    let mut paris = seed_location("1", "Paris", "France", 48.8566, 2.3522);
    paris.selected = true;
    vec![
        paris,
        seed_location("2", "Tokyo", "Japan", 35.6762, 139.6503),
        seed_location("3", "New York", "USA", 40.7128, -74.006),
    ]
}

pub fn seed_destinations() -> Vec<Destination> {
    let dest = |id: &str, name: &str, country: &str, days, image: &str, acts: [&str; 3]| {
        Destination {
            id: id.into(),
            name: name.to_string(),
            country: country.to_string(),
            days,
            image: image.to_string(),
            activities: acts.iter().map(|a| a.to_string()).collect(),
        }
    };
    vec![
        dest(
            "1",
            "Paris",
            "France",
            3,
            "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=400&q=80",
            ["Eiffel Tower", "Louvre Museum", "Notre Dame"],
        ),
        dest(
            "2",
            "Tokyo",
            "Japan",
            4,
            "https://images.unsplash.com/photo-1503899036084-c55cdd92da26?w=400&q=80",
            ["Tokyo Tower", "Shibuya Crossing", "Senso-ji Temple"],
        ),
    ]
}
