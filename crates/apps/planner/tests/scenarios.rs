use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use foundation::bounds::ScreenRect;
use foundation::ids::PlaceId;
use foundation::math::Vec2;
use globe::{CameraMode, MAX_ZOOM};
use itinerary::{
    CatalogRecommendationSource, Completion, Destination, RecommendationSource, RemovalPolicy,
    TravelPreferences,
};
use planner::{Command, DestinationInput, Planner, PlannerConfig, PlannerEvent, replay};
use pretty_assertions::assert_eq;

fn quiet_config() -> PlannerConfig {
    PlannerConfig {
        carousel_auto_play: false,
        ..PlannerConfig::default()
    }
}

fn ids(p: &Planner) -> Vec<String> {
    p.destinations().iter().map(|d| d.id.to_string()).collect()
}

fn edges(p: &Planner) -> Vec<String> {
    p.paths().iter().map(|p| p.id.clone()).collect()
}

#[test]
fn paris_tokyo_new_york_chain() {
    let mut config = quiet_config();
    config.destinations.truncate(1);
    let mut p = Planner::new(config).unwrap();
    assert!(p.paths().is_empty());

    p.add_destination(DestinationInput::Location { id: "2".into() })
        .unwrap();
    p.add_destination(DestinationInput::Location { id: "3".into() })
        .unwrap();

    assert_eq!(ids(&p), vec!["1", "2", "3"]);
    assert_eq!(edges(&p), vec!["path-1-2", "path-2-3"]);
    assert!(p.paths().iter().all(|p| p.animated));
}

#[test]
fn removing_the_middle_stop_leaves_a_gap() {
    let mut p = Planner::new(quiet_config()).unwrap();
    p.add_destination(DestinationInput::Location { id: "3".into() })
        .unwrap();
    p.remove_destination(&PlaceId::new("2")).unwrap();

    assert_eq!(ids(&p), vec!["1", "3"]);
    assert!(p.paths().is_empty());

    // Reordering heals the chain.
    p.reorder_destinations(&[PlaceId::new("3"), PlaceId::new("1")])
        .unwrap();
    assert_eq!(edges(&p), vec!["path-3-1"]);
}

#[test]
fn rebridge_policy_reconnects_neighbours() {
    let config = PlannerConfig {
        removal_policy: RemovalPolicy::Rebridge,
        ..quiet_config()
    };
    let mut p = Planner::new(config).unwrap();
    p.add_destination(DestinationInput::Location { id: "3".into() })
        .unwrap();
    p.remove_destination(&PlaceId::new("2")).unwrap();
    assert_eq!(edges(&p), vec!["path-1-3"]);
}

#[test]
fn zoom_saturates_at_the_upper_bound() {
    let mut p = Planner::new(quiet_config()).unwrap();
    for _ in 0..20 {
        p.zoom_in();
    }
    assert_eq!(p.camera().zoom(), MAX_ZOOM);
    assert!(!p.zoom_in());
}

#[test]
fn auto_rotation_is_lossless_under_uneven_frames() {
    let mut p = Planner::new(quiet_config()).unwrap();
    let start = p.camera().rotation().spin_deg;
    p.toggle_rotate().unwrap();

    // 2700 ms in irregular slices: exactly 90 ticks of 0.2 degrees.
    for ms in [7, 45, 13, 600, 35, 1000, 1, 999] {
        p.advance(Duration::from_millis(ms));
    }
    let expected = (start + 0.2 * 90.0).rem_euclid(360.0);
    assert!((p.camera().rotation().spin_deg - expected).abs() < 1e-9);
    assert_eq!(p.camera().mode(), CameraMode::AutoRotating);
}

#[test]
fn marker_drop_at_centre_lands_on_null_island() {
    let mut p = Planner::new(quiet_config()).unwrap();
    let rect = ScreenRect::from_origin_size(40.0, 60.0, 300.0, 300.0);
    p.begin_marker_drag(&PlaceId::new("3")).unwrap();
    let moved = p.drop_marker(Vec2::new(190.0, 210.0), rect).unwrap().unwrap();
    assert_eq!(moved.coordinates.lat_deg(), 0.0);
    assert_eq!(moved.coordinates.lon_deg(), 0.0);
    assert!(p.armed_marker().is_none());
}

#[test]
fn repeated_selection_keeps_one_flag() {
    let mut p = Planner::new(quiet_config()).unwrap();
    for id in ["2", "3", "3", "1", "2"] {
        p.select_location(&PlaceId::new(id)).unwrap();
        let flagged: Vec<&str> = p
            .locations()
            .iter()
            .filter(|l| l.selected)
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(flagged, vec![id]);
    }
}

#[test]
fn subscribers_see_every_mutation_in_order() {
    let mut p = Planner::new(quiet_config()).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    p.subscribe(move |e: &PlannerEvent| sink.borrow_mut().push(e.clone()));

    p.select_location(&PlaceId::new("3")).unwrap();
    p.add_selected_to_itinerary().unwrap();
    p.reorder_destinations(&[PlaceId::new("3"), PlaceId::new("1"), PlaceId::new("2")])
        .unwrap();
    p.remove_destination(&PlaceId::new("1")).unwrap();
    // Rejected commands emit nothing.
    assert!(p.remove_destination(&PlaceId::new("1")).is_err());

    let kinds: Vec<&str> = log
        .borrow()
        .iter()
        .map(|e| match e {
            PlannerEvent::LocationSelected { .. } => "selected",
            PlannerEvent::DestinationAdded { .. } => "added",
            PlannerEvent::DestinationsReordered { .. } => "reordered",
            PlannerEvent::DestinationRemoved { .. } => "removed",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["selected", "added", "reordered", "removed"]);

    let recorded = p.drain_events();
    assert_eq!(recorded.len(), 4);
    assert!(recorded.windows(2).all(|w| w[0].seq < w[1].seq));
}

#[test]
fn async_generation_with_stale_and_closed_results() {
    let mut p = Planner::new(quiet_config()).unwrap();
    let source = CatalogRecommendationSource::default();
    let prefs = TravelPreferences {
        duration_days: 4,
        ..TravelPreferences::default()
    };

    p.open_ai_planner();
    let first = p.submit_preferences(prefs.clone()).unwrap();
    let second = p.submit_preferences(prefs.clone()).unwrap();
    let plan = pollster::block_on(source.generate(&prefs));

    assert_eq!(p.deliver_recommendation(first, plan.clone()), Completion::Stale);
    // The session keeps working while a request is outstanding.
    p.zoom_out();
    assert_eq!(p.deliver_recommendation(second, plan.clone()), Completion::Applied);
    let summary = p.import_ready_recommendation().unwrap();
    assert_eq!(summary.added, vec![PlaceId::new("tokyo"), PlaceId::new("kyoto")]);
    assert_eq!(summary.skipped_days, vec![2, 4]);

    let third = p.submit_preferences(prefs).unwrap();
    p.close_ai_planner();
    assert_eq!(p.deliver_recommendation(third, plan), Completion::Closed);
    assert_eq!(p.destinations().len(), 4);
}

#[test]
fn scripted_session_from_json() {
    let script: Vec<Command> = serde_json::from_str(
        r#"[
            { "command": "toggle_rotate" },
            { "command": "advance", "ms": 150 },
            { "command": "select_location", "id": "3" },
            { "command": "add_selected_to_itinerary" },
            { "command": "reorder_destinations", "order": ["3", "2", "1"] },
            { "command": "toggle_weather" },
            { "command": "remove_destination", "id": "nope" }
        ]"#,
    )
    .unwrap();

    let mut p = Planner::new(quiet_config()).unwrap();
    let report = replay(&mut p, script, false);
    assert_eq!(report.applied, 6);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 6);

    let snap = report.snapshot;
    assert!((snap.camera.rotation.spin_deg - 41.0).abs() < 1e-9);
    assert_eq!(
        snap.paths.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        vec!["path-3-2", "path-2-1"]
    );
    assert!(snap.overlays.weather);
    assert!(snap.modified);
}

#[test]
fn explicit_record_keeps_its_fields() {
    let mut p = Planner::new(quiet_config()).unwrap();
    let record = Destination {
        id: PlaceId::new("rome"),
        name: "Rome".to_string(),
        country: "Italy".to_string(),
        days: 2,
        image: "rome.jpg".to_string(),
        activities: vec!["Colosseum".to_string()],
    };
    p.add_destination(DestinationInput::Record {
        destination: record.clone(),
    })
    .unwrap();
    assert_eq!(p.destinations().last(), Some(&record));
    assert_eq!(p.itinerary().total_days(), 9);
}
