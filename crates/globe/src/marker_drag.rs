//! Drag-and-drop relocation of globe markers.
//!
//! The drop position is converted to a coordinate by linear interpolation
//! over the globe's bounding rectangle:
//!
//! ```text
//! lon = (x / width)  * 360 - 180
//! lat = (y / height) * 180 - 90
//! ```
//!
//! This is a planar approximation, not the inverse of the sphere
//! projection: the rotation and zoom of the camera are ignored, and screen
//! y grows downward so the top edge maps to latitude -90. Changing it would
//! move where dropped markers land.

use foundation::bounds::ScreenRect;
use foundation::error::{PlannerError, PlannerResult};
use foundation::ids::PlaceId;
use foundation::math::{GeoCoord, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locations::LocationSet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarkerDragState {
    #[default]
    Idle,
    ArmedForDrag(PlaceId),
}

/// A marker moved to a new coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relocation {
    pub id: PlaceId,
    pub coordinates: GeoCoord,
}

/// Planar drop-point → coordinate mapping, see the module docs.
pub fn drop_point_to_coord(point: Vec2, rect: ScreenRect) -> PlannerResult<GeoCoord> {
    if rect.is_degenerate() {
        return Err(PlannerError::validation("globe rectangle has no area"));
    }
    if !rect.contains(point) {
        return Err(PlannerError::validation(format!(
            "drop point ({}, {}) is outside the globe",
            point.x, point.y
        )));
    }
    let frac = rect.fraction_of(point);
    let lon = frac.x * 360.0 - 180.0;
    let lat = frac.y * 180.0 - 90.0;
    GeoCoord::new(lat, lon)
}

#[derive(Debug, Clone, Default)]
pub struct MarkerDragController {
    state: MarkerDragState,
}

impl MarkerDragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MarkerDragState {
        &self.state
    }

    pub fn armed(&self) -> Option<&PlaceId> {
        match &self.state {
            MarkerDragState::Idle => None,
            MarkerDragState::ArmedForDrag(id) => Some(id),
        }
    }

    /// Arms the controller with the marker being dragged. A new drag-start
    /// replaces a previous one that never dropped.
    pub fn begin(&mut self, locations: &LocationSet, id: &PlaceId) -> PlannerResult<()> {
        if !locations.contains(id) {
            return Err(PlannerError::not_found(id));
        }
        debug!(%id, "marker drag armed");
        self.state = MarkerDragState::ArmedForDrag(id.clone());
        Ok(())
    }

    /// Drops the armed marker at `point` inside `rect` and moves it.
    ///
    /// `Ok(None)` means nothing was armed and the drop was ignored. On error
    /// the controller stays armed and the location is unchanged.
    pub fn drop_at(
        &mut self,
        locations: &mut LocationSet,
        point: Vec2,
        rect: ScreenRect,
    ) -> PlannerResult<Option<Relocation>> {
        let MarkerDragState::ArmedForDrag(id) = &self.state else {
            debug!("drop ignored: no marker armed");
            return Ok(None);
        };
        let coordinates = drop_point_to_coord(point, rect)?;
        locations.relocate(id, coordinates)?;
        let relocation = Relocation {
            id: id.clone(),
            coordinates,
        };
        self.state = MarkerDragState::Idle;
        Ok(Some(relocation))
    }

    /// Drag ended without a drop on the globe.
    pub fn cancel(&mut self) {
        self.state = MarkerDragState::Idle;
    }
}
