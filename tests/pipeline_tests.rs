//! End-to-end pipeline tests: load a GeoJSON collection, drive the
//! session through filter and region changes, and assert on the view
//! models the renderers produce.

use crisis_atlas::{
    AtlasConfig, DashboardSession, DrawnShape, EventCollection, FilterUpdate, LatLngBounds,
    Selection,
};

fn sample_geojson() -> String {
    // Six events around Abuja across two years and three event types
    let features = [
        (
            "Protests",
            "Peaceful protest",
            "Demonstrations",
            "10-January-2020",
            2020,
            0,
            "AMAC",
            7.45,
            9.02,
        ),
        (
            "Protests",
            "Protest with intervention",
            "Demonstrations",
            "03-June-2020",
            2020,
            1,
            "AMAC",
            7.47,
            9.04,
        ),
        (
            "Riots",
            "Mob violence",
            "Political violence",
            "21-August-2020",
            2020,
            3,
            "Bwari",
            7.50,
            9.06,
        ),
        (
            "Riots",
            "Violent demonstration",
            "Political violence",
            "14-February-2021",
            2021,
            2,
            "Bwari",
            7.52,
            9.08,
        ),
        (
            "Battles",
            "Armed clash",
            "Political violence",
            "05-May-2021",
            2021,
            7,
            "Kwali",
            7.56,
            9.12,
        ),
        (
            "Battles",
            "Armed clash",
            "Political violence",
            "30-November-2021",
            2021,
            4,
            "Kwali",
            7.58,
            9.14,
        ),
    ];

    let body: Vec<String> = features
        .iter()
        .enumerate()
        .map(|(i, (ty, sub, dis, date, year, deaths, admin2, lng, lat))| {
            format!(
                r#"{{
                    "type": "Feature",
                    "properties": {{
                        "OBJECTID": {oid},
                        "EVENT_TYPE": "{ty}",
                        "SUB_EVENT_TYPE": "{sub}",
                        "DISORDER_TYPE": "{dis}",
                        "EVENT_DATE": "{date}",
                        "YEAR": {year},
                        "FATALITIES": {deaths},
                        "ADMIN2": "{admin2}"
                    }},
                    "geometry": {{ "type": "Point", "coordinates": [{lng}, {lat}] }}
                }}"#,
                oid = i + 1
            )
        })
        .collect();

    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        body.join(",")
    )
}

fn session() -> DashboardSession {
    let events = EventCollection::from_json_str(&sample_geojson()).unwrap();
    DashboardSession::new(AtlasConfig::default(), events)
}

#[test]
fn all_views_agree_on_the_filtered_subset() {
    let mut s = session();
    s.set_filter(FilterUpdate::year(Selection::Only(2020)));

    assert_eq!(s.filtered().len(), 3);
    assert_eq!(s.views.indicators.total_events, 3);
    assert_eq!(s.views.markers.len(), 3);
    assert_eq!(s.views.heat.samples().len(), 3);
    assert_eq!(s.views.recent.rows.len(), 3);

    let donut_total: u64 = s.views.donut.slices.iter().map(|sl| sl.count).sum();
    assert_eq!(donut_total, 3);
}

#[test]
fn filters_combine_conjunctively() {
    let mut s = session();
    s.set_filter(FilterUpdate::disorder(Selection::Only(
        "Political violence".to_string(),
    )));
    assert_eq!(s.filtered().len(), 4);

    s.set_filter(FilterUpdate::year(Selection::Only(2021)));
    assert_eq!(s.filtered().len(), 3);

    s.set_filter(FilterUpdate::event_type(Selection::Only(
        "Battles".to_string(),
    )));
    assert_eq!(s.filtered().len(), 2);

    // Relaxing one field keeps the other two applied
    s.set_filter(FilterUpdate::year(Selection::All));
    assert_eq!(s.filtered().len(), 2);
}

#[test]
fn rerendering_the_same_state_is_idempotent() {
    let mut s = session();
    s.set_filter(FilterUpdate::event_type(Selection::Only(
        "Riots".to_string(),
    )));

    let markers_before: Vec<String> = s
        .views
        .markers
        .markers()
        .iter()
        .map(|m| m.fid.clone())
        .collect();
    let rows_before = s.views.recent.rows.clone();

    // Re-applying the identical update must not change any view output
    s.set_filter(FilterUpdate::event_type(Selection::Only(
        "Riots".to_string(),
    )));

    let markers_after: Vec<String> = s
        .views
        .markers
        .markers()
        .iter()
        .map(|m| m.fid.clone())
        .collect();

    assert_eq!(markers_before, markers_after);
    assert_eq!(rows_before, s.views.recent.rows);
}

#[test]
fn reset_restores_the_initial_presentation() {
    let mut s = session();
    let initial_total = s.views.indicators.total_events;
    let initial_fids: Vec<String> = s.filtered().iter().map(|f| f.fid.clone()).collect();

    s.set_filter(FilterUpdate::year(Selection::Only(2021)));
    s.set_region(&DrawnShape::Rectangle(LatLngBounds::from_coords(
        9.10, 7.54, 9.16, 7.60,
    )));
    assert!(s.filtered().len() < initial_total);

    s.clear_all();
    let restored: Vec<String> = s.filtered().iter().map(|f| f.fid.clone()).collect();
    assert_eq!(restored, initial_fids);
    assert_eq!(s.views.indicators.total_events, initial_total);
    assert!(!s.region().is_active());
}

#[test]
fn toggling_a_selection_twice_is_a_no_op() {
    let mut s = session();
    let baseline: Vec<String> = s.filtered().iter().map(|f| f.fid.clone()).collect();

    s.toggle_event_type("Battles");
    assert_eq!(s.filtered().len(), 2);
    s.toggle_event_type("Battles");

    let after: Vec<String> = s.filtered().iter().map(|f| f.fid.clone()).collect();
    assert_eq!(baseline, after);
}

#[test]
fn a_new_region_fully_replaces_the_old_one() {
    let mut s = session();

    // Box around the two AMAC protests
    s.set_region(&DrawnShape::Rectangle(LatLngBounds::from_coords(
        9.00, 7.43, 9.05, 7.48,
    )));
    assert_eq!(s.filtered().len(), 2);

    // Box around the two Kwali battles; the first box must stop applying
    s.set_region(&DrawnShape::Rectangle(LatLngBounds::from_coords(
        9.10, 7.54, 9.16, 7.60,
    )));
    let fids: Vec<&str> = s.filtered().iter().map(|f| f.fid.as_str()).collect();
    assert_eq!(fids, vec!["5", "6"]);

    s.clear_region();
    assert_eq!(s.filtered().len(), 6);
}

#[test]
fn region_and_attribute_filters_stack() {
    let mut s = session();
    s.set_region(&DrawnShape::Circle {
        center: crisis_atlas::LatLng::new(9.07, 7.51),
        radius: 3000.0,
    });
    let spatial_only = s.filtered().len();
    assert!(spatial_only >= 1);

    s.set_filter(FilterUpdate::event_type(Selection::Only(
        "Riots".to_string(),
    )));
    assert!(s.filtered().len() <= spatial_only);
    for f in s.filtered() {
        assert_eq!(f.properties.event_type.as_deref(), Some("Riots"));
    }
}

#[test]
fn year_buckets_use_the_explicit_field_first() {
    let raw = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "EVENT_DATE": "10-March-2020", "YEAR": 2020 }, "geometry": null },
            { "type": "Feature", "properties": { "EVENT_DATE": "01-January-2021", "YEAR": 2021 }, "geometry": null },
            { "type": "Feature", "properties": { "EVENT_DATE": "31-December-2021" }, "geometry": null }
        ]
    }"#;
    let events = EventCollection::from_json_str(raw).unwrap();
    let mut s = DashboardSession::new(AtlasConfig::default(), events);

    s.set_filter(FilterUpdate::year(Selection::Only(2021)));
    assert_eq!(s.filtered().len(), 2);
    assert_eq!(s.views.timeline.points, vec![(2021, 2)]);
}

#[test]
fn upstream_date_format_flows_through_the_list() {
    let mut s = session();
    s.set_filter(FilterUpdate::event_type(Selection::Only(
        "Protests".to_string(),
    )));

    let rows = &s.views.recent.rows;
    assert_eq!(rows.len(), 2);
    // Newest first, ISO-formatted for display
    assert_eq!(rows[0].iso_date(), "2020-06-03");
    assert_eq!(rows[1].iso_date(), "2020-01-10");
}

#[test]
fn empty_collection_yields_zero_states_not_errors() {
    let events =
        EventCollection::from_json_str(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
    let mut s = DashboardSession::new(AtlasConfig::default(), events);

    assert!(s.filtered().is_empty());
    assert_eq!(s.views.indicators.total_events, 0);
    assert_eq!(s.views.indicators.total_fatalities, 0);
    assert!(s.views.donut.slices.is_empty());
    assert!(s.views.recent.rows.is_empty());

    // State changes on an empty dataset must still be safe
    s.set_filter(FilterUpdate::year(Selection::Only(2020)));
    s.set_region(&DrawnShape::Rectangle(LatLngBounds::from_coords(
        9.0, 7.0, 9.2, 7.6,
    )));
    s.clear_all();
    assert!(s.filtered().is_empty());
}

#[cfg(feature = "debug")]
#[test]
fn logging_init_is_idempotent() {
    crisis_atlas::init_logging();
    crisis_atlas::init_logging();
}

#[test]
fn fatality_totals_track_the_filter() {
    let mut s = session();
    assert_eq!(s.views.indicators.total_fatalities, 17);

    s.set_filter(FilterUpdate::event_type(Selection::Only(
        "Battles".to_string(),
    )));
    assert_eq!(s.views.indicators.total_fatalities, 11);

    let battles_bar = s
        .views
        .fatalities
        .bars
        .iter()
        .find(|(label, _, _)| label == "Battles")
        .unwrap();
    assert_eq!(battles_bar.1, 11.0);
}
