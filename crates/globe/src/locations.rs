use foundation::error::{PlannerError, PlannerResult};
use foundation::ids::PlaceId;
use foundation::math::GeoCoord;
use serde::{Deserialize, Serialize};

/// A place shown as a marker on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: PlaceId,
    pub name: String,
    pub country: String,
    pub coordinates: GeoCoord,
    #[serde(default)]
    pub selected: bool,
}

impl Location {
    pub fn new(
        id: impl Into<PlaceId>,
        name: impl Into<String>,
        country: impl Into<String>,
        coordinates: GeoCoord,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            coordinates,
            selected: false,
        }
    }
}

/// The globe's markers in insertion order.
///
/// Locations are never removed. Their coordinates change only through
/// marker relocation and their `selected` flag only through the selection
/// coordinator, which is why both setters are crate-private.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSet {
    items: Vec<Location>,
}

impl LocationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from seed data, rejecting duplicate ids and more than one
    /// pre-selected location.
    pub fn from_locations(locations: Vec<Location>) -> PlannerResult<Self> {
        let mut set = Self::new();
        for loc in locations {
            set.insert(loc)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, location: Location) -> PlannerResult<()> {
        if self.contains(&location.id) {
            return Err(PlannerError::duplicate(&location.id));
        }
        if location.selected && self.selected().is_some() {
            return Err(PlannerError::validation(format!(
                "{} is pre-selected but another location already is",
                location.id
            )));
        }
        self.items.push(location);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &PlaceId) -> Option<&Location> {
        self.items.iter().find(|l| &l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> + '_ {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.items
    }

    pub fn selected(&self) -> Option<&Location> {
        self.items.iter().find(|l| l.selected)
    }

    pub(crate) fn relocate(&mut self, id: &PlaceId, coordinates: GeoCoord) -> PlannerResult<()> {
        let loc = self
            .items
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| PlannerError::not_found(id))?;
        loc.coordinates = coordinates;
        Ok(())
    }

    /// Marks exactly `id` as selected, or clears all flags for `None`.
    pub(crate) fn set_selected(&mut self, id: Option<&PlaceId>) {
        for loc in &mut self.items {
            loc.selected = Some(&loc.id) == id;
        }
    }
}
