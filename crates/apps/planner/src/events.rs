use foundation::ids::PlaceId;
use foundation::math::GeoCoord;
use itinerary::{RequestTicket, TravelPath};
use serde::{Deserialize, Serialize};

/// Outbound notification, emitted once per successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlannerEvent {
    LocationSelected {
        id: PlaceId,
    },
    DestinationAdded {
        id: PlaceId,
        path: Option<TravelPath>,
    },
    DestinationRemoved {
        id: PlaceId,
    },
    DestinationsReordered {
        order: Vec<PlaceId>,
    },
    MarkerRelocated {
        id: PlaceId,
        coordinates: GeoCoord,
    },
    RecommendationReady {
        ticket: RequestTicket,
    },
    RecommendationImported {
        added: Vec<PlaceId>,
        skipped_days: Vec<u32>,
    },
}
