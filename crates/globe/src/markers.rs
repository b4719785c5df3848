//! Read-only projections of locations and legs for the presentation layer.

use foundation::ids::PlaceId;
use foundation::math::{Vec3, ViewTransform, project_in_view};
use serde::{Deserialize, Serialize};

use crate::locations::LocationSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedMarker {
    pub id: PlaceId,
    pub name: String,
    pub position: Vec3,
    pub selected: bool,
}

/// A leg between two markers, both endpoints in view space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSegment {
    pub id: String,
    pub from: Vec3,
    pub to: Vec3,
    pub animated: bool,
}

/// One leg to project. Ids that have no globe location are skipped.
#[derive(Debug, Clone, Copy)]
pub struct SegmentRef<'a> {
    pub id: &'a str,
    pub from: &'a PlaceId,
    pub to: &'a PlaceId,
    pub animated: bool,
}

pub fn project_markers(
    locations: &LocationSet,
    radius: f64,
    view: &ViewTransform,
) -> Vec<ProjectedMarker> {
    locations
        .iter()
        .map(|loc| ProjectedMarker {
            id: loc.id.clone(),
            name: loc.name.clone(),
            position: project_in_view(loc.coordinates, radius, view),
            selected: loc.selected,
        })
        .collect()
}

pub fn project_segments<'a>(
    locations: &LocationSet,
    segments: impl IntoIterator<Item = SegmentRef<'a>>,
    radius: f64,
    view: &ViewTransform,
) -> Vec<ProjectedSegment> {
    segments
        .into_iter()
        .filter_map(|seg| {
            let from = locations.get(seg.from)?;
            let to = locations.get(seg.to)?;
            Some(ProjectedSegment {
                id: seg.id.to_string(),
                from: project_in_view(from.coordinates, radius, view),
                to: project_in_view(to.coordinates, radius, view),
                animated: seg.animated,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use foundation::ids::PlaceId;
    use foundation::math::{GeoCoord, ViewTransform, project_coord};
    use pretty_assertions::assert_eq;

    use super::{SegmentRef, project_markers, project_segments};
    use crate::locations::{Location, LocationSet};

    fn set() -> LocationSet {
        LocationSet::from_locations(vec![
            Location::new("1", "Paris", "France", GeoCoord::new(48.8566, 2.3522).unwrap()),
            Location::new("2", "Tokyo", "Japan", GeoCoord::new(35.6762, 139.6503).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn identity_view_matches_plain_projection() {
        let locations = set();
        let markers = project_markers(&locations, 150.0, &ViewTransform::identity());
        assert_eq!(markers.len(), 2);
        let paris = locations.get(&PlaceId::new("1")).unwrap();
        assert_eq!(markers[0].position, project_coord(paris.coordinates, 150.0));
    }

    #[test]
    fn zoom_scales_marker_distance() {
        let view = ViewTransform {
            tilt_deg: 10.0,
            spin_deg: 45.0,
            zoom: 2.0,
        };
        for m in project_markers(&set(), 150.0, &view) {
            assert!((m.position.length() - 300.0).abs() < 1e-9);
        }
    }

    #[test]
    fn segments_without_locations_are_skipped() {
        let (a, b, x) = (PlaceId::new("1"), PlaceId::new("2"), PlaceId::new("kyoto"));
        let segs = project_segments(
            &set(),
            [
                SegmentRef {
                    id: "path-1-2",
                    from: &a,
                    to: &b,
                    animated: true,
                },
                SegmentRef {
                    id: "path-2-kyoto",
                    from: &b,
                    to: &x,
                    animated: true,
                },
            ],
            150.0,
            &ViewTransform::identity(),
        );
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].id, "path-1-2");
    }
}
