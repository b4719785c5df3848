use foundation::ids::PlaceId;
use globe::{CameraMode, CameraState, Location};
use itinerary::{AiPlannerState, Destination, TravelPath};
use serde::{Deserialize, Serialize};

use crate::session::{Overlays, Planner};

/// Serializable view of a whole session, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    pub camera: CameraState,
    pub camera_mode: CameraMode,
    pub locations: Vec<Location>,
    pub selected: Option<PlaceId>,
    pub destinations: Vec<Destination>,
    pub paths: Vec<TravelPath>,
    pub total_days: u32,
    pub ai_planner_open: bool,
    pub ai_planner: AiPlannerState,
    pub carousel_index: usize,
    pub carousel_auto_play: bool,
    pub overlays: Overlays,
    pub preview_open: bool,
    pub favorite: bool,
    pub modified: bool,
}

impl Planner {
    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            camera: self.camera().state(),
            camera_mode: self.camera().mode(),
            locations: self.locations().as_slice().to_vec(),
            selected: self.selected().cloned(),
            destinations: self.destinations().to_vec(),
            paths: self.paths().to_vec(),
            total_days: self.itinerary().total_days(),
            ai_planner_open: self.ai_planner().is_open(),
            ai_planner: self.ai_planner().state().clone(),
            carousel_index: self.carousel().index(),
            carousel_auto_play: self.carousel().auto_play(),
            overlays: self.overlays(),
            preview_open: self.is_preview_open(),
            favorite: self.is_favorite(),
            modified: self.is_modified(),
        }
    }
}
