//! The dashboard session: one loaded collection, the active filter and
//! region, and the view stack they feed.
//!
//! Every state change goes through the same cycle: merge the change into
//! the session state, re-evaluate the filter over the full collection, and
//! re-render every view from the resulting subset. Views never mutate
//! session state; user gestures come back in as new state changes.

use crate::core::config::AtlasConfig;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crate::data::feature::{bounds_of, EventCollection, EventFeature};
use crate::filter::region::{DrawnShape, RegionTracker};
use crate::filter::{self, ActiveFilter, FilterUpdate, Selection};
use crate::render::dispatcher::RenderDispatcher;
use crate::render::{RenderSnapshot, ViewRenderer};
use crate::prelude::Arc;

/// Minimum zoom used when jumping to a single feature from the list
const FOCUS_ZOOM: f64 = 10.0;

pub struct DashboardSession {
    config: AtlasConfig,
    events: EventCollection,
    filter: ActiveFilter,
    region: RegionTracker,
    filtered: Vec<Arc<EventFeature>>,
    pub views: RenderDispatcher,
    pub viewport: Viewport,
}

impl DashboardSession {
    /// Starts a session over a loaded collection: no filter, no region,
    /// every view rendered from the full collection, viewport fitted to
    /// the data (or left at the configured default when the collection
    /// has no located features).
    pub fn new(config: AtlasConfig, events: EventCollection) -> Self {
        let views = RenderDispatcher::new(&config, &events);
        let viewport = Viewport::new(
            config.default_center,
            config.default_zoom,
            Point::new(1024.0, 768.0),
        );

        let mut session = Self {
            config,
            events,
            filter: ActiveFilter::default(),
            region: RegionTracker::new(),
            filtered: Vec::new(),
            views,
            viewport,
        };
        session.refresh();
        session.fit_to_filtered();
        session
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn events(&self) -> &EventCollection {
        &self.events
    }

    pub fn filter(&self) -> &ActiveFilter {
        &self.filter
    }

    pub fn region(&self) -> &RegionTracker {
        &self.region
    }

    /// The features passing the current filter and region, in collection
    /// order.
    pub fn filtered(&self) -> &[Arc<EventFeature>] {
        &self.filtered
    }

    /// Applies a partial filter change, then refilters, re-renders and
    /// refits the viewport to the surviving features.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        self.filter.merge(update);
        self.refresh();
        self.fit_to_filtered();
    }

    /// Chart-slice click: selecting the active type again resets that
    /// field to match-all.
    pub fn toggle_event_type(&mut self, label: &str) {
        let next = self.filter.event_type.toggled(label.to_string());
        self.set_filter(FilterUpdate::event_type(next));
    }

    pub fn toggle_disorder(&mut self, label: &str) {
        let next = self.filter.disorder.toggled(label.to_string());
        self.set_filter(FilterUpdate::disorder(next));
    }

    pub fn set_year(&mut self, year: Selection<i32>) {
        self.set_filter(FilterUpdate::year(year));
    }

    /// Installs a newly drawn region, replacing any previous one, and
    /// fits the viewport to the drawn shape rather than to the matches,
    /// so an empty result still shows where the user drew.
    pub fn set_region(&mut self, shape: &DrawnShape) {
        let bounds = self.region.set(shape).bounds().clone();
        self.refresh();
        self.viewport.fit_bounds(&bounds, self.config.fit_padding);
    }

    /// Removes the drawn region, keeping attribute filters as they are.
    pub fn clear_region(&mut self) {
        if !self.region.is_active() {
            return;
        }
        self.region.clear();
        self.refresh();
        self.fit_to_filtered();
    }

    /// Resets everything: filters back to match-all, region discarded,
    /// views re-rendered from the full collection.
    pub fn clear_all(&mut self) {
        self.filter = ActiveFilter::default();
        self.region.clear();
        self.refresh();
        self.fit_to_filtered();
    }

    /// Pauses or resumes the heat layer. Resuming re-renders it from the
    /// current filtered subset immediately: filter changes made while the
    /// layer was paused must become visible on the same toggle, not on
    /// the next filter event.
    pub fn set_heat_paused(&mut self, paused: bool) {
        self.views.heat.set_paused(paused);
        if !paused {
            let snapshot = RenderSnapshot {
                features: &self.filtered,
                filter: &self.filter,
            };
            if let Err(e) = self.views.heat.render(&snapshot) {
                log::warn!("renderer '{}' failed: {e}", self.views.heat.name());
            }
        }
    }

    /// Jumps the viewport to a single feature, by id. Zoom only ever
    /// increases; a list click at street level must not zoom the map out.
    pub fn focus_feature(&mut self, fid: &str) {
        if let Some(marker) = self.views.markers.marker(fid) {
            let zoom = self.viewport.zoom.max(FOCUS_ZOOM);
            self.viewport.set_view(marker.position, zoom);
        } else {
            log::debug!("focus requested for unknown feature id {fid}");
        }
    }

    /// Re-evaluates the filter over the full collection and re-renders
    /// every view from the result.
    fn refresh(&mut self) {
        self.filtered = self
            .events
            .iter()
            .filter(|f| filter::matches(f, &self.filter, self.region.region()))
            .cloned()
            .collect();

        log::debug!(
            "filter pass: {} of {} features match",
            self.filtered.len(),
            self.events.len()
        );

        self.views.render_all(&RenderSnapshot {
            features: &self.filtered,
            filter: &self.filter,
        });
    }

    fn fit_to_filtered(&mut self) {
        if let Some(bounds) = bounds_of(&self.filtered) {
            self.viewport.fit_bounds(&bounds, self.config.fit_padding);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLngBounds;
    use crate::data::feature::EventProperties;
    use crate::data::geometry::Geometry;

    fn event(
        event_type: &str,
        disorder: &str,
        year: i64,
        lng: f64,
        lat: f64,
    ) -> (Option<serde_json::Value>, Option<Geometry>, EventProperties) {
        (
            None,
            Some(Geometry::Point {
                coordinates: [lng, lat],
            }),
            EventProperties {
                event_type: Some(event_type.to_string()),
                disorder_type: Some(disorder.to_string()),
                year: Some(year),
                fatalities: Some(1.0),
                ..Default::default()
            },
        )
    }

    fn session() -> DashboardSession {
        let events = EventCollection::from_features(vec![
            event("Protests", "Demonstrations", 2020, 7.45, 9.02),
            event("Riots", "Political violence", 2020, 7.50, 9.06),
            event("Battles", "Political violence", 2021, 7.55, 9.10),
        ]);
        DashboardSession::new(AtlasConfig::default(), events)
    }

    #[test]
    fn test_new_session_shows_everything() {
        let s = session();
        assert_eq!(s.filtered().len(), 3);
        assert_eq!(s.views.indicators.total_events, 3);
        assert_eq!(s.views.markers.len(), 3);
    }

    #[test]
    fn test_set_filter_narrows_views() {
        let mut s = session();
        s.set_filter(FilterUpdate::year(Selection::Only(2020)));
        assert_eq!(s.filtered().len(), 2);
        assert_eq!(s.views.indicators.total_events, 2);

        s.set_filter(FilterUpdate::event_type(Selection::Only("Riots".to_string())));
        assert_eq!(s.filtered().len(), 1);
        assert_eq!(s.views.markers.len(), 1);
    }

    #[test]
    fn test_toggle_event_type_round_trip() {
        let mut s = session();
        s.toggle_event_type("Riots");
        assert_eq!(s.filtered().len(), 1);

        // Toggling the active selection again restores match-all
        s.toggle_event_type("Riots");
        assert_eq!(s.filtered().len(), 3);
    }

    #[test]
    fn test_region_intersects_filters() {
        let mut s = session();

        // Tight box around the first two features only
        s.set_region(&DrawnShape::Rectangle(LatLngBounds::from_coords(
            9.00, 7.40, 9.08, 7.52,
        )));
        assert_eq!(s.filtered().len(), 2);

        // A replacement region fully supersedes the previous one
        s.set_region(&DrawnShape::Rectangle(LatLngBounds::from_coords(
            9.09, 7.53, 9.12, 7.60,
        )));
        assert_eq!(s.filtered().len(), 1);

        s.clear_region();
        assert_eq!(s.filtered().len(), 3);
    }

    #[test]
    fn test_clear_all_resets_state() {
        let mut s = session();
        s.set_filter(FilterUpdate::event_type(Selection::Only("Battles".to_string())));
        s.set_region(&DrawnShape::Rectangle(LatLngBounds::from_coords(
            9.09, 7.53, 9.12, 7.60,
        )));
        assert_eq!(s.filtered().len(), 1);

        s.clear_all();
        assert_eq!(s.filter(), &ActiveFilter::default());
        assert!(!s.region().is_active());
        assert_eq!(s.filtered().len(), 3);
        assert_eq!(s.views.indicators.total_events, 3);
    }

    #[test]
    fn test_focus_feature_never_zooms_out() {
        let mut s = session();
        s.viewport.set_view(s.viewport.center, 15.0);
        let fid = s.filtered()[0].fid.clone();
        s.focus_feature(&fid);
        assert_eq!(s.viewport.zoom, 15.0);

        s.viewport.set_view(s.viewport.center, 3.0);
        s.focus_feature(&fid);
        assert_eq!(s.viewport.zoom, 10.0);
    }

    #[test]
    fn test_heat_resume_reflects_filter_changes_made_while_paused() {
        let mut s = session();
        assert_eq!(s.views.heat.samples().len(), 3);

        s.set_heat_paused(true);
        s.set_filter(FilterUpdate::year(Selection::Only(2021)));
        assert_eq!(s.filtered().len(), 1);
        // Paused: the layer still holds the pre-filter samples
        assert_eq!(s.views.heat.samples().len(), 3);

        // Resuming must recompute from the current subset right away
        s.set_heat_paused(false);
        assert_eq!(s.views.heat.samples().len(), 1);
    }

    #[test]
    fn test_empty_result_keeps_viewport() {
        let mut s = session();
        let before = s.viewport.center;
        s.set_filter(FilterUpdate::year(Selection::Only(1999)));
        assert!(s.filtered().is_empty());
        assert_eq!(s.viewport.center, before);
    }
}
