//! Ordered itinerary plus the derived travel paths between stops.
//!
//! The destination sequence is authoritative. Paths are a function of it and
//! are rebuilt in one place, [`ItineraryGraph::regenerate_paths`], whenever a
//! mutation needs the full chain. Every mutating method validates its input
//! before touching either list, so callers never observe a half-applied
//! change.

use std::collections::BTreeSet;

use foundation::error::{PlannerError, PlannerResult};
use foundation::ids::PlaceId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::destination::Destination;
use crate::path::TravelPath;
use crate::recommendation::Recommendation;

/// Activities carried over from each recommended day on import.
pub const IMPORTED_ACTIVITY_LIMIT: usize = 3;

/// What happens to the chain when a destination in the middle is removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Drop every path touching the removed stop and leave its former
    /// neighbours unconnected.
    #[default]
    LeaveGap,
    /// Rebuild the whole chain so the former neighbours are connected.
    Rebridge,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub added: Vec<PlaceId>,
    /// Days skipped because their place was already in the itinerary or the
    /// day listed no place.
    pub skipped_days: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItineraryGraph {
    destinations: Vec<Destination>,
    paths: Vec<TravelPath>,
    policy: RemovalPolicy,
}

impl ItineraryGraph {
    pub fn new(policy: RemovalPolicy) -> Self {
        Self {
            destinations: Vec::new(),
            paths: Vec::new(),
            policy,
        }
    }

    /// Seeds the itinerary with a full chain of paths.
    pub fn with_destinations(
        policy: RemovalPolicy,
        destinations: Vec<Destination>,
    ) -> PlannerResult<Self> {
        let mut seen = BTreeSet::new();
        for d in &destinations {
            d.validate()?;
            if !seen.insert(&d.id) {
                return Err(PlannerError::duplicate(&d.id));
            }
        }
        let mut graph = Self {
            destinations,
            paths: Vec::new(),
            policy,
        };
        graph.regenerate_paths();
        Ok(graph)
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn paths(&self) -> &[TravelPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &PlaceId) -> Option<&Destination> {
        self.destinations.iter().find(|d| &d.id == id)
    }

    pub fn ids(&self) -> Vec<PlaceId> {
        self.destinations.iter().map(|d| d.id.clone()).collect()
    }

    pub fn total_days(&self) -> u32 {
        self.destinations.iter().map(|d| d.days).sum()
    }

    fn position(&self, id: &PlaceId) -> Option<usize> {
        self.destinations.iter().position(|d| &d.id == id)
    }

    /// Appends `destination`, linking it from the previous last stop.
    ///
    /// Returns the new path, if one was created.
    pub fn add(&mut self, destination: Destination) -> PlannerResult<Option<TravelPath>> {
        destination.validate()?;
        if self.contains(&destination.id) {
            return Err(PlannerError::duplicate(&destination.id));
        }

        let link = self
            .destinations
            .last()
            .map(|last| TravelPath::between(&last.id, &destination.id));
        info!(id = %destination.id, linked = link.is_some(), "destination added");
        self.destinations.push(destination);
        if let Some(path) = &link {
            self.paths.push(path.clone());
        }
        self.check_invariants();
        Ok(link)
    }

    /// Removes a destination and every path that touches it.
    pub fn remove(&mut self, id: &PlaceId) -> PlannerResult<Destination> {
        let idx = self.position(id).ok_or_else(|| PlannerError::not_found(id))?;
        let removed = self.destinations.remove(idx);
        match self.policy {
            RemovalPolicy::LeaveGap => self.paths.retain(|p| !p.touches(id)),
            RemovalPolicy::Rebridge => self.regenerate_paths(),
        }
        info!(%id, policy = ?self.policy, paths = self.paths.len(), "destination removed");
        self.check_invariants();
        Ok(removed)
    }

    /// Replaces the order with `order`, which must be a permutation of the
    /// current ids, and rebuilds every path.
    pub fn reorder(&mut self, order: &[PlaceId]) -> PlannerResult<()> {
        if order.len() != self.destinations.len() {
            return Err(PlannerError::validation(format!(
                "reorder lists {} ids but the itinerary has {}",
                order.len(),
                self.destinations.len()
            )));
        }
        let mut seen = BTreeSet::new();
        for id in order {
            if !seen.insert(id) {
                return Err(PlannerError::validation(format!(
                    "reorder lists {id} more than once"
                )));
            }
            if !self.contains(id) {
                return Err(PlannerError::validation(format!(
                    "reorder lists {id}, which is not in the itinerary"
                )));
            }
        }

        let mut pool = std::mem::take(&mut self.destinations);
        for id in order {
            // Presence was checked above; each id is taken exactly once.
            if let Some(i) = pool.iter().position(|d| &d.id == id) {
                self.destinations.push(pool.swap_remove(i));
            }
        }
        debug_assert!(pool.is_empty());
        self.regenerate_paths();
        debug!(order = ?order, "destinations reordered");
        Ok(())
    }

    /// Appends one destination per recommended day and rebuilds the chain.
    ///
    /// Each day contributes its first place, for one day, with its first
    /// three activities. Days whose place is already present (including
    /// earlier days of the same import) are skipped so ids stay unique.
    pub fn import_recommendation(
        &mut self,
        recommendation: &Recommendation,
    ) -> PlannerResult<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut incoming: Vec<Destination> = Vec::new();

        for day in &recommendation.itinerary {
            let Some(place) = day.places.first() else {
                summary.skipped_days.push(day.day);
                continue;
            };
            if self.contains(&place.id) || incoming.iter().any(|d| d.id == place.id) {
                summary.skipped_days.push(day.day);
                continue;
            }
            let destination = Destination {
                id: place.id.clone(),
                name: place.name.clone(),
                country: place.country.clone(),
                days: 1,
                image: place.image.clone(),
                activities: day
                    .activities
                    .iter()
                    .take(IMPORTED_ACTIVITY_LIMIT)
                    .cloned()
                    .collect(),
            };
            destination.validate()?;
            incoming.push(destination);
        }

        summary.added = incoming.iter().map(|d| d.id.clone()).collect();
        self.destinations.extend(incoming);
        self.regenerate_paths();
        info!(
            added = summary.added.len(),
            skipped = summary.skipped_days.len(),
            "recommendation imported"
        );
        Ok(summary)
    }

    /// Changes the planned stay of one destination.
    pub fn set_days(&mut self, id: &PlaceId, days: u32) -> PlannerResult<()> {
        if days == 0 {
            return Err(PlannerError::validation(format!(
                "destination {id} must last at least one day"
            )));
        }
        let idx = self.position(id).ok_or_else(|| PlannerError::not_found(id))?;
        self.destinations[idx].days = days;
        Ok(())
    }

    /// One animated path per consecutive pair, replacing all previous paths.
    fn regenerate_paths(&mut self) {
        self.paths = self
            .destinations
            .windows(2)
            .map(|pair| TravelPath::between(&pair[0].id, &pair[1].id))
            .collect();
        self.check_invariants();
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            let ids: BTreeSet<&PlaceId> = self.destinations.iter().map(|d| &d.id).collect();
            assert_eq!(ids.len(), self.destinations.len(), "duplicate destination id");
            for p in &self.paths {
                assert!(
                    ids.contains(&p.from) && ids.contains(&p.to),
                    "path {} references a missing destination",
                    p.id
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use foundation::error::PlannerError;
    use foundation::ids::PlaceId;
    use pretty_assertions::assert_eq;

    use super::{ItineraryGraph, RemovalPolicy};
    use crate::destination::Destination;
    use crate::path::TravelPath;
    use crate::recommendation::{ItineraryDay, Recommendation, sample_japan_plan};

    fn dest(id: &str) -> Destination {
        Destination {
            id: PlaceId::new(id),
            name: id.to_string(),
            country: "Somewhere".to_string(),
            days: 2,
            image: String::new(),
            activities: Vec::new(),
        }
    }

    fn ids(ids: &[&str]) -> Vec<PlaceId> {
        ids.iter().map(|s| PlaceId::new(*s)).collect()
    }

    fn edges(graph: &ItineraryGraph) -> Vec<(String, String)> {
        graph
            .paths()
            .iter()
            .map(|p| (p.from.to_string(), p.to.to_string()))
            .collect()
    }

    fn edge(from: &str, to: &str) -> (String, String) {
        (from.to_string(), to.to_string())
    }

    fn chain(names: &[&str], policy: RemovalPolicy) -> ItineraryGraph {
        ItineraryGraph::with_destinations(policy, names.iter().map(|n| dest(n)).collect())
            .unwrap()
    }

    #[test]
    fn add_links_from_previous_last() {
        let mut g = chain(&["paris"], RemovalPolicy::LeaveGap);
        assert!(g.paths().is_empty());

        let link = g.add(dest("tokyo")).unwrap();
        assert_eq!(link, Some(TravelPath::between(&"paris".into(), &"tokyo".into())));
        assert_eq!(g.ids(), ids(&["paris", "tokyo"]));
        assert_eq!(edges(&g), vec![edge("paris", "tokyo")]);

        g.add(dest("new-york")).unwrap();
        assert_eq!(
            edges(&g),
            vec![edge("paris", "tokyo"), edge("tokyo", "new-york")]
        );
        assert!(g.paths().iter().all(|p| p.animated));
    }

    #[test]
    fn first_add_creates_no_path() {
        let mut g = ItineraryGraph::new(RemovalPolicy::LeaveGap);
        assert_eq!(g.add(dest("a")).unwrap(), None);
        assert!(g.paths().is_empty());
    }

    #[test]
    fn duplicate_add_is_rejected_without_change() {
        let mut g = chain(&["a", "b"], RemovalPolicy::LeaveGap);
        let before = g.clone();
        let err = g.add(dest("a")).unwrap_err();
        assert_eq!(err, PlannerError::Duplicate("a".to_string()));
        assert_eq!(g, before);
    }

    #[test]
    fn remove_middle_leaves_gap_by_default() {
        let mut g = chain(&["a", "b", "c"], RemovalPolicy::LeaveGap);
        g.remove(&"b".into()).unwrap();
        assert_eq!(g.ids(), ids(&["a", "c"]));
        assert!(g.paths().is_empty());
    }

    #[test]
    fn remove_middle_rebridges_when_configured() {
        let mut g = chain(&["a", "b", "c"], RemovalPolicy::Rebridge);
        g.remove(&"b".into()).unwrap();
        assert_eq!(edges(&g), vec![edge("a", "c")]);
    }

    #[test]
    fn remove_end_keeps_other_paths() {
        let mut g = chain(&["a", "b", "c"], RemovalPolicy::LeaveGap);
        g.remove(&"c".into()).unwrap();
        assert_eq!(edges(&g), vec![edge("a", "b")]);
    }

    #[test]
    fn remove_unknown_is_not_found() {
        let mut g = chain(&["a"], RemovalPolicy::LeaveGap);
        assert!(matches!(
            g.remove(&"zz".into()),
            Err(PlannerError::NotFound(_))
        ));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn add_after_gap_links_from_new_last() {
        let mut g = chain(&["a", "b", "c"], RemovalPolicy::LeaveGap);
        g.remove(&"b".into()).unwrap();
        g.add(dest("d")).unwrap();
        assert_eq!(edges(&g), vec![edge("c", "d")]);
    }

    #[test]
    fn reorder_rebuilds_consecutive_paths() {
        let mut g = chain(&["a", "b", "c", "d"], RemovalPolicy::LeaveGap);
        g.reorder(&ids(&["c", "a", "d", "b"])).unwrap();

        assert_eq!(g.ids(), ids(&["c", "a", "d", "b"]));
        assert_eq!(
            edges(&g),
            vec![edge("c", "a"), edge("a", "d"), edge("d", "b")]
        );
        assert!(g.paths().iter().all(|p| p.animated));
        // Days travel with their destination.
        assert_eq!(g.total_days(), 8);
    }

    #[test]
    fn reorder_heals_a_gap() {
        let mut g = chain(&["a", "b", "c"], RemovalPolicy::LeaveGap);
        g.remove(&"b".into()).unwrap();
        g.reorder(&ids(&["a", "c"])).unwrap();
        assert_eq!(edges(&g), vec![edge("a", "c")]);
    }

    #[test]
    fn reorder_rejects_non_permutations() {
        let mut g = chain(&["a", "b", "c"], RemovalPolicy::LeaveGap);
        let before = g.clone();
        for bad in [
            ids(&["a", "b"]),
            ids(&["a", "b", "b"]),
            ids(&["a", "b", "x"]),
            ids(&["a", "b", "c", "a"]),
        ] {
            assert!(matches!(g.reorder(&bad), Err(PlannerError::Validation(_))));
            assert_eq!(g, before);
        }
    }

    #[test]
    fn import_maps_days_and_skips_repeats() {
        let mut g = chain(&["paris"], RemovalPolicy::LeaveGap);
        let summary = g.import_recommendation(&sample_japan_plan()).unwrap();

        assert_eq!(summary.added, ids(&["tokyo", "kyoto", "hakone"]));
        assert_eq!(summary.skipped_days, vec![2, 4, 6, 7]);
        assert_eq!(g.ids(), ids(&["paris", "tokyo", "kyoto", "hakone"]));
        assert_eq!(
            edges(&g),
            vec![
                edge("paris", "tokyo"),
                edge("tokyo", "kyoto"),
                edge("kyoto", "hakone")
            ]
        );

        let tokyo = g.get(&"tokyo".into()).unwrap();
        assert_eq!(tokyo.days, 1);
        assert_eq!(
            tokyo.activities,
            vec!["Arrive in Tokyo", "Check-in at hotel", "Visit Shibuya Crossing"]
        );
    }

    #[test]
    fn import_skips_days_without_places() {
        let mut g = ItineraryGraph::new(RemovalPolicy::LeaveGap);
        let rec = Recommendation {
            places: Vec::new(),
            itinerary: vec![ItineraryDay {
                day: 1,
                places: Vec::new(),
                activities: vec!["Rest".to_string()],
            }],
        };
        let summary = g.import_recommendation(&rec).unwrap();
        assert!(summary.added.is_empty());
        assert_eq!(summary.skipped_days, vec![1]);
        assert!(g.is_empty());
    }

    #[test]
    fn set_days_validates() {
        let mut g = chain(&["a"], RemovalPolicy::LeaveGap);
        g.set_days(&"a".into(), 5).unwrap();
        assert_eq!(g.total_days(), 5);
        assert!(g.set_days(&"a".into(), 0).is_err());
        assert!(g.set_days(&"x".into(), 1).is_err());
    }

    #[test]
    fn removal_policy_reads_snake_case() {
        let policy: RemovalPolicy = serde_json::from_str("\"rebridge\"").unwrap();
        assert_eq!(policy, RemovalPolicy::Rebridge);
        assert_eq!(RemovalPolicy::default(), RemovalPolicy::LeaveGap);
    }

    #[test]
    fn hyphenated_ids_share_display_ids_but_not_endpoints() {
        let g = chain(&["a", "b-c", "a-b", "c"], RemovalPolicy::LeaveGap);
        let ids: Vec<&str> = g.paths().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["path-a-b-c", "path-b-c-a-b", "path-a-b-c"]);

        let first = g.paths()[0].endpoints();
        let last = g.paths()[2].endpoints();
        assert_eq!(first, (&PlaceId::new("a"), &PlaceId::new("b-c")));
        assert_eq!(last, (&PlaceId::new("a-b"), &PlaceId::new("c")));
        assert_ne!(first, last);
    }

    #[test]
    fn seed_rejects_duplicates() {
        let err =
            ItineraryGraph::with_destinations(RemovalPolicy::LeaveGap, vec![dest("a"), dest("a")])
                .unwrap_err();
        assert!(matches!(err, PlannerError::Duplicate(_)));
    }
}
