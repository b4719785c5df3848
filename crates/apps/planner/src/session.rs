//! The planner session: one owner for all interactive state.
//!
//! Controllers hold only their own session data; the `Planner` lends them
//! the camera, location set and itinerary by `&mut` for the duration of a
//! command. Every command either applies fully or returns an error with no
//! state changed, and every successful mutation emits one [`PlannerEvent`].

use std::time::Duration;

use foundation::bounds::ScreenRect;
use foundation::error::{PlannerError, PlannerResult};
use foundation::ids::PlaceId;
use foundation::math::Vec2;
use globe::{
    Camera, LocationSet, MarkerDragController, PointerController, ProjectedMarker,
    ProjectedSegment, Relocation, SegmentRef, SelectionCoordinator, project_markers,
    project_segments,
};
use itinerary::{
    AiPlanner, Completion, Destination, DestinationDefaults, ImportSummary, ItineraryGraph,
    Recommendation, RecommendationError, RequestTicket, TravelPath, TravelPreferences,
};
use runtime::{EventBus, PeriodicScheduler, PeriodicTask, Recorded, SubscriptionId, TaskHandle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::carousel::PhotoCarousel;
use crate::config::{ConfigError, PlannerConfig};
use crate::events::PlannerEvent;

pub const AUTO_ROTATE_TASK: &str = "auto-rotate";
pub const CAROUSEL_TASK: &str = "carousel";
/// Undrained events kept by the session; subscribers still see every event.
pub const EVENT_LOG_LIMIT: usize = 1024;

/// What to add to the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestinationInput {
    /// A globe location, filled in with the configured defaults.
    Location { id: PlaceId },
    Record { destination: Destination },
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlays {
    pub weather: bool,
    pub prices: bool,
}

pub struct Planner {
    camera: Camera,
    pointer: PointerController,
    marker_drag: MarkerDragController,
    locations: LocationSet,
    selection: SelectionCoordinator,
    itinerary: ItineraryGraph,
    ai: AiPlanner,
    carousel: PhotoCarousel,
    overlays: Overlays,
    scheduler: PeriodicScheduler,
    auto_rotate_task: Option<TaskHandle>,
    carousel_task: Option<TaskHandle>,
    events: EventBus<PlannerEvent>,
    globe_radius: f64,
    destination_defaults: DestinationDefaults,
    carousel_interval: Duration,
    preview_open: bool,
    favorite: bool,
    modified: bool,
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("camera", &self.camera.state())
            .field("destinations", &self.itinerary.len())
            .field("selection", &self.selection.current())
            .field("tasks", &self.scheduler.task_count())
            .field("events", &self.events)
            .finish()
    }
}

fn schedule(
    scheduler: &mut PeriodicScheduler,
    name: &'static str,
    period: Duration,
) -> PlannerResult<TaskHandle> {
    scheduler
        .schedule(PeriodicTask::new(name, period))
        .map_err(|e| PlannerError::validation(e.to_string()))
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = Camera::new(config.camera)?;
        let locations = LocationSet::from_locations(config.locations)?;
        let selection = SelectionCoordinator::from_locations(&locations);
        let itinerary =
            ItineraryGraph::with_destinations(config.removal_policy, config.destinations)?;

        let mut planner = Self {
            camera,
            pointer: PointerController::new(config.drag_sensitivity),
            marker_drag: MarkerDragController::new(),
            locations,
            selection,
            itinerary,
            ai: AiPlanner::new(),
            carousel: PhotoCarousel::new(config.photos, false),
            overlays: Overlays::default(),
            scheduler: PeriodicScheduler::new(),
            auto_rotate_task: None,
            carousel_task: None,
            events: EventBus::with_log_limit(EVENT_LOG_LIMIT),
            globe_radius: config.globe_radius,
            destination_defaults: config.destination_defaults,
            carousel_interval: Duration::from_millis(config.carousel_interval_ms),
            preview_open: true,
            favorite: false,
            modified: false,
        };
        planner.set_carousel_auto_play(config.carousel_auto_play)?;
        info!(
            locations = planner.locations.len(),
            destinations = planner.itinerary.len(),
            "planner session started"
        );
        Ok(planner)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn selected(&self) -> Option<&PlaceId> {
        self.selection.current()
    }

    pub fn itinerary(&self) -> &ItineraryGraph {
        &self.itinerary
    }

    pub fn destinations(&self) -> &[Destination] {
        self.itinerary.destinations()
    }

    pub fn paths(&self) -> &[TravelPath] {
        self.itinerary.paths()
    }

    pub fn ai_planner(&self) -> &AiPlanner {
        &self.ai
    }

    pub fn carousel(&self) -> &PhotoCarousel {
        &self.carousel
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    pub fn is_pointer_dragging(&self) -> bool {
        self.pointer.is_active()
    }

    pub fn armed_marker(&self) -> Option<&PlaceId> {
        self.marker_drag.armed()
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview_open
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn globe_radius(&self) -> f64 {
        self.globe_radius
    }

    pub fn active_task_count(&self) -> usize {
        self.scheduler.task_count()
    }

    pub fn markers(&self) -> Vec<ProjectedMarker> {
        project_markers(
            &self.locations,
            self.globe_radius,
            &self.camera.view_transform(),
        )
    }

    /// Legs whose endpoints are both globe locations, in view space.
    pub fn path_segments(&self) -> Vec<ProjectedSegment> {
        let refs = self.itinerary.paths().iter().map(|p| SegmentRef {
            id: &p.id,
            from: &p.from,
            to: &p.to,
            animated: p.animated,
        });
        project_segments(
            &self.locations,
            refs,
            self.globe_radius,
            &self.camera.view_transform(),
        )
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PlannerEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Undrained events, at most [`EVENT_LOG_LIMIT`] of the newest.
    pub fn events(&self) -> &[Recorded<PlannerEvent>] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Recorded<PlannerEvent>> {
        self.events.drain()
    }

    fn emit(&mut self, event: PlannerEvent) {
        self.modified = true;
        self.events.emit(event);
    }

    /// Feeds elapsed wall time to the periodic tasks.
    pub fn advance(&mut self, elapsed: Duration) {
        for firing in self.scheduler.advance(elapsed) {
            if Some(firing.handle) == self.auto_rotate_task {
                self.camera.apply_auto_rotate_ticks(firing.ticks);
            } else if Some(firing.handle) == self.carousel_task {
                self.carousel.advance(firing.ticks);
            } else {
                debug!(task = firing.name, "firing for unknown task");
            }
        }
    }

    /// Cancels every periodic task and abandons any drag in progress.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.auto_rotate_task = None;
        self.carousel_task = None;
        self.pointer.end(&mut self.camera);
        self.marker_drag.cancel();
        info!("planner session stopped");
    }

    /// Returns whether the auto-rotate flag changed.
    pub fn toggle_rotate(&mut self) -> PlannerResult<bool> {
        if !self.camera.toggle_rotate() {
            return Ok(false);
        }
        self.sync_auto_rotate_task()?;
        Ok(true)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.camera.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.camera.zoom_out()
    }

    pub fn reset_camera(&mut self) -> PlannerResult<()> {
        self.pointer.end(&mut self.camera);
        self.camera.reset();
        self.sync_auto_rotate_task()
    }

    pub fn home_camera(&mut self) {
        self.camera.home();
    }

    fn sync_auto_rotate_task(&mut self) -> PlannerResult<()> {
        match (self.camera.auto_rotate(), self.auto_rotate_task) {
            (true, None) => {
                let period = Duration::from_millis(self.camera.settings().auto_rotate_interval_ms);
                self.auto_rotate_task =
                    Some(schedule(&mut self.scheduler, AUTO_ROTATE_TASK, period)?);
            }
            (false, Some(handle)) => {
                self.scheduler.cancel(handle);
                self.auto_rotate_task = None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Ignored while a marker is armed, so the globe stays put under it.
    pub fn begin_pointer_drag(&mut self, at_px: Vec2) -> bool {
        if let Some(id) = self.marker_drag.armed() {
            debug!(%id, "pointer drag ignored during marker drag");
            return false;
        }
        self.pointer.begin(&mut self.camera, at_px)
    }

    pub fn update_pointer_drag(&mut self, at_px: Vec2) -> bool {
        self.pointer.update(&mut self.camera, at_px)
    }

    pub fn end_pointer_drag(&mut self) -> bool {
        self.pointer.end(&mut self.camera)
    }

    pub fn begin_marker_drag(&mut self, id: &PlaceId) -> PlannerResult<()> {
        self.marker_drag
            .begin(&self.locations, id)
            .inspect_err(|e| warn!(error = %e, "marker drag rejected"))
    }

    /// Drops the armed marker. `Ok(None)` means no marker was armed.
    pub fn drop_marker(
        &mut self,
        point: Vec2,
        rect: ScreenRect,
    ) -> PlannerResult<Option<Relocation>> {
        let relocation = self
            .marker_drag
            .drop_at(&mut self.locations, point, rect)
            .inspect_err(|e| warn!(error = %e, "marker drop rejected"))?;
        if let Some(r) = &relocation {
            info!(
                id = %r.id,
                lat = r.coordinates.lat_deg(),
                lon = r.coordinates.lon_deg(),
                "marker relocated"
            );
            self.emit(PlannerEvent::MarkerRelocated {
                id: r.id.clone(),
                coordinates: r.coordinates,
            });
        }
        Ok(relocation)
    }

    pub fn cancel_marker_drag(&mut self) {
        self.marker_drag.cancel();
    }

    pub fn select_location(&mut self, id: &PlaceId) -> PlannerResult<()> {
        self.selection
            .select(&mut self.locations, id)
            .inspect_err(|e| warn!(error = %e, "selection rejected"))?;
        self.preview_open = true;
        self.emit(PlannerEvent::LocationSelected { id: id.clone() });
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.locations);
    }

    pub fn close_preview(&mut self) {
        self.preview_open = false;
    }

    /// Appends a destination and returns the path linking it, if any.
    pub fn add_destination(&mut self, input: DestinationInput) -> PlannerResult<Option<TravelPath>> {
        let destination = match input {
            DestinationInput::Location { id } => {
                let loc = self
                    .locations
                    .get(&id)
                    .ok_or_else(|| PlannerError::not_found(&id))?;
                Destination::from_place(
                    loc.id.clone(),
                    loc.name.clone(),
                    loc.country.clone(),
                    &self.destination_defaults,
                )
            }
            DestinationInput::Record { destination } => destination,
        };
        let id = destination.id.clone();
        let path = self
            .itinerary
            .add(destination)
            .inspect_err(|e| warn!(error = %e, "add rejected"))?;
        self.emit(PlannerEvent::DestinationAdded {
            id,
            path: path.clone(),
        });
        Ok(path)
    }

    /// Adds the currently selected location and closes its preview.
    pub fn add_selected_to_itinerary(&mut self) -> PlannerResult<Option<TravelPath>> {
        let id = self
            .selection
            .current()
            .cloned()
            .ok_or_else(|| PlannerError::validation("no location is selected"))?;
        let path = self.add_destination(DestinationInput::Location { id })?;
        self.preview_open = false;
        Ok(path)
    }

    pub fn remove_destination(&mut self, id: &PlaceId) -> PlannerResult<Destination> {
        let removed = self
            .itinerary
            .remove(id)
            .inspect_err(|e| warn!(error = %e, "remove rejected"))?;
        self.emit(PlannerEvent::DestinationRemoved { id: id.clone() });
        Ok(removed)
    }

    pub fn reorder_destinations(&mut self, order: &[PlaceId]) -> PlannerResult<()> {
        self.itinerary
            .reorder(order)
            .inspect_err(|e| warn!(error = %e, "reorder rejected"))?;
        self.emit(PlannerEvent::DestinationsReordered {
            order: order.to_vec(),
        });
        Ok(())
    }

    pub fn set_destination_days(&mut self, id: &PlaceId, days: u32) -> PlannerResult<()> {
        self.itinerary.set_days(id, days)?;
        self.modified = true;
        Ok(())
    }

    pub fn import_recommendation(
        &mut self,
        recommendation: &Recommendation,
    ) -> PlannerResult<ImportSummary> {
        let summary = self.itinerary.import_recommendation(recommendation)?;
        self.emit(PlannerEvent::RecommendationImported {
            added: summary.added.clone(),
            skipped_days: summary.skipped_days.clone(),
        });
        Ok(summary)
    }

    /// Imports the recommendation the AI planner is showing.
    pub fn import_ready_recommendation(&mut self) -> PlannerResult<ImportSummary> {
        let recommendation = self
            .ai
            .recommendation()
            .cloned()
            .ok_or_else(|| PlannerError::validation("no recommendation is ready"))?;
        self.import_recommendation(&recommendation)
    }

    pub fn open_ai_planner(&mut self) {
        self.ai.open();
    }

    pub fn close_ai_planner(&mut self) {
        self.ai.close();
    }

    pub fn back_to_preferences(&mut self) {
        self.ai.back_to_preferences();
    }

    /// Starts a generation request. The caller runs the generator and hands
    /// the result back through [`Planner::deliver_recommendation`].
    pub fn submit_preferences(
        &mut self,
        preferences: TravelPreferences,
    ) -> PlannerResult<RequestTicket> {
        self.ai
            .submit(preferences)
            .inspect_err(|e| warn!(error = %e, "preferences rejected"))
    }

    pub fn deliver_recommendation(
        &mut self,
        ticket: RequestTicket,
        result: Result<Recommendation, RecommendationError>,
    ) -> Completion {
        let completion = self.ai.complete(ticket, result);
        if completion == Completion::Applied {
            self.events.emit(PlannerEvent::RecommendationReady { ticket });
        }
        completion
    }

    pub fn carousel_next(&mut self) {
        self.carousel.next();
    }

    pub fn carousel_previous(&mut self) {
        self.carousel.previous();
    }

    pub fn carousel_go_to(&mut self, index: usize) -> PlannerResult<()> {
        if self.carousel.go_to(index) {
            Ok(())
        } else {
            Err(PlannerError::validation(format!(
                "photo index {index} outside 0..{}",
                self.carousel.photos().len()
            )))
        }
    }

    pub fn set_carousel_auto_play(&mut self, on: bool) -> PlannerResult<()> {
        match (on, self.carousel_task) {
            (true, None) => {
                self.carousel_task = Some(schedule(
                    &mut self.scheduler,
                    CAROUSEL_TASK,
                    self.carousel_interval,
                )?);
            }
            (false, Some(handle)) => {
                self.scheduler.cancel(handle);
                self.carousel_task = None;
            }
            _ => {}
        }
        self.carousel.set_auto_play(on);
        Ok(())
    }

    /// Returns the new state of the overlay.
    pub fn toggle_weather(&mut self) -> bool {
        self.overlays.weather = !self.overlays.weather;
        self.overlays.weather
    }

    /// Returns the new state of the overlay.
    pub fn toggle_prices(&mut self) -> bool {
        self.overlays.prices = !self.overlays.prices;
        self.overlays.prices
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }

    /// Clears the modified flag. Nothing is written anywhere.
    pub fn mark_saved(&mut self) {
        debug!(destinations = self.itinerary.len(), "trip marked saved");
        self.modified = false;
    }
}

impl Drop for Planner {
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}
