use foundation::ids::PlaceId;
use serde::{Deserialize, Serialize};

/// Directed leg between two consecutive destinations.
///
/// Paths are derived from the destination order by [`crate::ItineraryGraph`]
/// and never edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPath {
    /// Display id `path-{from}-{to}`. Not unique when place ids contain
    /// `-`; the `(from, to)` pair is the identity.
    pub id: String,
    pub from: PlaceId,
    pub to: PlaceId,
    pub animated: bool,
}

impl TravelPath {
    pub fn between(from: &PlaceId, to: &PlaceId) -> Self {
        Self {
            id: format!("path-{from}-{to}"),
            from: from.clone(),
            to: to.clone(),
            animated: true,
        }
    }

    pub fn touches(&self, id: &PlaceId) -> bool {
        &self.from == id || &self.to == id
    }

    pub fn endpoints(&self) -> (&PlaceId, &PlaceId) {
        (&self.from, &self.to)
    }
}
