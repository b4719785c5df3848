//! Serializable commands, so a session can be driven from a script.

use std::time::Duration;

use foundation::bounds::ScreenRect;
use foundation::error::{PlannerError, PlannerResult};
use foundation::ids::PlaceId;
use foundation::math::Vec2;
use itinerary::{
    AiPlannerState, CatalogRecommendationSource, Recommendation, RecommendationError,
    RequestTicket, TravelPreferences,
};
use serde::{Deserialize, Serialize};

use crate::session::{DestinationInput, Planner};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    ToggleRotate,
    ZoomIn,
    ZoomOut,
    ResetCamera,
    HomeCamera,
    BeginPointerDrag { at: Vec2 },
    UpdatePointerDrag { at: Vec2 },
    EndPointerDrag,
    BeginMarkerDrag { id: PlaceId },
    DropMarker { at: Vec2, rect: ScreenRect },
    CancelMarkerDrag,
    SelectLocation { id: PlaceId },
    ClearSelection,
    ClosePreview,
    AddDestination { input: DestinationInput },
    AddSelectedToItinerary,
    RemoveDestination { id: PlaceId },
    ReorderDestinations { order: Vec<PlaceId> },
    SetDestinationDays { id: PlaceId, days: u32 },
    ImportRecommendation { recommendation: Recommendation },
    ImportReadyRecommendation,
    OpenAiPlanner,
    CloseAiPlanner,
    BackToPreferences,
    SubmitPreferences {
        #[serde(default)]
        preferences: TravelPreferences,
    },
    DeliverRecommendation {
        ticket: RequestTicket,
        result: Result<Recommendation, String>,
    },
    /// Answers the outstanding request with the built-in sample plan.
    DeliverSamplePlan,
    ToggleWeather,
    TogglePrices,
    ToggleFavorite,
    MarkSaved,
    CarouselNext,
    CarouselPrevious,
    CarouselGoTo { index: usize },
    SetCarouselAutoPlay { on: bool },
    Advance { ms: u64 },
}

impl Command {
    /// The serialized tag, used in logs and replay reports.
    pub fn name(&self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.get("command").and_then(|c| c.as_str()).map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl Planner {
    /// Runs one command. Commands that merely report "nothing changed"
    /// (a clamped zoom, an ignored pointer-down) still succeed.
    pub fn apply(&mut self, command: Command) -> PlannerResult<()> {
        match command {
            Command::ToggleRotate => {
                self.toggle_rotate()?;
            }
            Command::ZoomIn => {
                self.zoom_in();
            }
            Command::ZoomOut => {
                self.zoom_out();
            }
            Command::ResetCamera => self.reset_camera()?,
            Command::HomeCamera => self.home_camera(),
            Command::BeginPointerDrag { at } => {
                self.begin_pointer_drag(at);
            }
            Command::UpdatePointerDrag { at } => {
                self.update_pointer_drag(at);
            }
            Command::EndPointerDrag => {
                self.end_pointer_drag();
            }
            Command::BeginMarkerDrag { id } => self.begin_marker_drag(&id)?,
            Command::DropMarker { at, rect } => {
                self.drop_marker(at, rect)?;
            }
            Command::CancelMarkerDrag => self.cancel_marker_drag(),
            Command::SelectLocation { id } => self.select_location(&id)?,
            Command::ClearSelection => self.clear_selection(),
            Command::ClosePreview => self.close_preview(),
            Command::AddDestination { input } => {
                self.add_destination(input)?;
            }
            Command::AddSelectedToItinerary => {
                self.add_selected_to_itinerary()?;
            }
            Command::RemoveDestination { id } => {
                self.remove_destination(&id)?;
            }
            Command::ReorderDestinations { order } => self.reorder_destinations(&order)?,
            Command::SetDestinationDays { id, days } => self.set_destination_days(&id, days)?,
            Command::ImportRecommendation { recommendation } => {
                self.import_recommendation(&recommendation)?;
            }
            Command::ImportReadyRecommendation => {
                self.import_ready_recommendation()?;
            }
            Command::OpenAiPlanner => self.open_ai_planner(),
            Command::CloseAiPlanner => self.close_ai_planner(),
            Command::BackToPreferences => self.back_to_preferences(),
            Command::SubmitPreferences { preferences } => {
                self.submit_preferences(preferences)?;
            }
            Command::DeliverRecommendation { ticket, result } => {
                self.deliver_recommendation(ticket, result.map_err(RecommendationError::new));
            }
            Command::DeliverSamplePlan => {
                let AiPlannerState::Generating {
                    ticket,
                    preferences,
                } = self.ai_planner().state()
                else {
                    return Err(PlannerError::validation("no recommendation is being generated"));
                };
                let ticket = *ticket;
                let plan = CatalogRecommendationSource::default().plan_for(preferences);
                self.deliver_recommendation(ticket, Ok(plan));
            }
            Command::ToggleWeather => {
                self.toggle_weather();
            }
            Command::TogglePrices => {
                self.toggle_prices();
            }
            Command::ToggleFavorite => {
                self.toggle_favorite();
            }
            Command::MarkSaved => self.mark_saved(),
            Command::CarouselNext => self.carousel_next(),
            Command::CarouselPrevious => self.carousel_previous(),
            Command::CarouselGoTo { index } => self.carousel_go_to(index)?,
            Command::SetCarouselAutoPlay { on } => self.set_carousel_auto_play(on)?,
            Command::Advance { ms } => self.advance(Duration::from_millis(ms)),
        }
        Ok(())
    }
}
