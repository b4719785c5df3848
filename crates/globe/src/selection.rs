use foundation::error::{PlannerError, PlannerResult};
use foundation::ids::PlaceId;
use tracing::debug;

use crate::locations::LocationSet;

/// Single source of truth for the currently selected location.
///
/// The coordinator keeps the id; the matching `Location::selected` flag is
/// kept in step on every call, so at most one location is ever flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCoordinator {
    current: Option<PlaceId>,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts whichever location the seed data marked as selected.
    pub fn from_locations(locations: &LocationSet) -> Self {
        Self {
            current: locations.selected().map(|l| l.id.clone()),
        }
    }

    pub fn current(&self) -> Option<&PlaceId> {
        self.current.as_ref()
    }

    /// Selects `id`, clearing any previous selection.
    ///
    /// The id is checked before anything changes; an unknown id leaves both
    /// the coordinator and the location flags untouched.
    pub fn select(&mut self, locations: &mut LocationSet, id: &PlaceId) -> PlannerResult<()> {
        if !locations.contains(id) {
            return Err(PlannerError::not_found(id));
        }
        locations.set_selected(Some(id));
        debug!(%id, previous = ?self.current, "location selected");
        self.current = Some(id.clone());
        Ok(())
    }

    pub fn clear(&mut self, locations: &mut LocationSet) {
        locations.set_selected(None);
        self.current = None;
    }
}
