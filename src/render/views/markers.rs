use crate::core::config::ClusteringConfig;
use crate::core::geo::LatLng;
use crate::data::feature::EventProperties;
use crate::prelude::HashMap;
use crate::render::style::{type_style, UNKNOWN};
use crate::render::{RenderSnapshot, ViewRenderer};
use crate::spatial::clustering::{ClusterBubble, MarkerClusterer};
use crate::Result;

/// One dot marker on the map
#[derive(Debug, Clone)]
pub struct DotMarker {
    pub fid: String,
    pub position: LatLng,
    /// Fill color from the shared event-type palette
    pub color: &'static str,
    pub stroke: &'static str,
    /// Popup text shown when the marker is opened
    pub popup: String,
}

/// The map's point layer: one marker per point feature in the filtered
/// collection, plus the identifier-to-marker view index and the cluster
/// grouping.
///
/// Every render clears and rebuilds markers, index and clusterer in the
/// same pass, so stale entries from a previous filter state never persist.
pub struct MarkerView {
    markers: Vec<DotMarker>,
    index: HashMap<String, usize>,
    clusterer: MarkerClusterer,
}

impl MarkerView {
    pub fn new(config: ClusteringConfig) -> Self {
        Self {
            markers: Vec::new(),
            index: HashMap::default(),
            clusterer: MarkerClusterer::new(config),
        }
    }

    pub fn markers(&self) -> &[DotMarker] {
        &self.markers
    }

    /// Looks a marker up by feature identifier (list-row click path)
    pub fn marker(&self, fid: &str) -> Option<&DotMarker> {
        self.index.get(fid).map(|&i| &self.markers[i])
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Cluster bubbles at the given zoom
    pub fn clusters(&self, zoom: f64) -> Vec<ClusterBubble> {
        self.clusterer.clusters(zoom)
    }
}

impl ViewRenderer for MarkerView {
    fn name(&self) -> &str {
        "markers"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        self.markers.clear();
        self.index.clear();
        self.clusterer.clear();

        for feature in snapshot.features {
            let Some(position) = feature.position() else {
                continue;
            };
            let style = type_style(feature.properties.event_type.as_deref());

            self.index.insert(feature.fid.clone(), self.markers.len());
            self.clusterer.insert(feature.fid.clone(), position);
            self.markers.push(DotMarker {
                fid: feature.fid.clone(),
                position,
                color: style.fill,
                stroke: style.stroke,
                popup: build_popup(&feature.properties),
            });
        }

        log::debug!("marker layer rebuilt: {} markers", self.markers.len());
        Ok(())
    }
}

/// Plain-text popup body for a feature's attribute record. Empty fields
/// are omitted rather than rendered as blanks.
pub fn build_popup(props: &EventProperties) -> String {
    let title = match (&props.event_type, &props.sub_event_type) {
        (Some(t), Some(s)) => format!("{t} — {s}"),
        (Some(t), None) => t.clone(),
        (None, Some(s)) => s.clone(),
        (None, None) => UNKNOWN.to_string(),
    };

    let mut lines = vec![title];
    fn push(lines: &mut Vec<String>, label: &str, value: &Option<String>) {
        if let Some(v) = value {
            if !v.is_empty() {
                lines.push(format!("{label}: {v}"));
            }
        }
    }

    push(&mut lines, "Date", &props.event_date);
    if let Some(f) = props.fatalities {
        if f > 0.0 {
            lines.push(format!("Deaths: {}", f as i64));
        }
    }
    push(&mut lines, "Disorder", &props.disorder_type);
    push(&mut lines, "Interaction", &props.interaction);
    push(&mut lines, "Location", &props.admin2);
    push(&mut lines, "Source", &props.source);
    push(&mut lines, "Actor 1", &props.actor1);
    push(&mut lines, "Actor 2", &props.actor2);
    push(&mut lines, "Notes", &props.notes);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::{EventCollection, EventProperties};
    use crate::data::geometry::Geometry;
    use crate::filter::ActiveFilter;

    fn collection() -> EventCollection {
        let point = |lng: f64, lat: f64| {
            Some(Geometry::Point {
                coordinates: [lng, lat],
            })
        };
        EventCollection::from_features(vec![
            (
                None,
                point(7.49, 9.05),
                EventProperties {
                    event_type: Some("Riots".to_string()),
                    ..Default::default()
                },
            ),
            (
                None,
                point(7.52, 9.08),
                EventProperties {
                    event_type: Some("Battles".to_string()),
                    ..Default::default()
                },
            ),
            // No geometry: must not produce a marker
            (None, None, EventProperties::default()),
        ])
    }

    #[test]
    fn test_rebuild_replaces_index() {
        let events = collection();
        let filter = ActiveFilter::default();
        let mut view = MarkerView::new(ClusteringConfig::default());

        let snapshot = RenderSnapshot {
            features: events.features(),
            filter: &filter,
        };
        view.render(&snapshot).unwrap();
        assert_eq!(view.len(), 2);
        assert!(view.marker("1").is_some());

        // Render a narrower subset: stale entries must be gone
        let subset = vec![events.features()[1].clone()];
        let snapshot = RenderSnapshot {
            features: &subset,
            filter: &filter,
        };
        view.render(&snapshot).unwrap();
        assert_eq!(view.len(), 1);
        assert!(view.marker("1").is_none());
        assert!(view.marker("2").is_some());
    }

    #[test]
    fn test_idempotent_render() {
        let events = collection();
        let filter = ActiveFilter::default();
        let mut view = MarkerView::new(ClusteringConfig::default());
        let snapshot = RenderSnapshot {
            features: events.features(),
            filter: &filter,
        };

        view.render(&snapshot).unwrap();
        let first: Vec<_> = view.markers().iter().map(|m| m.fid.clone()).collect();
        view.render(&snapshot).unwrap();
        let second: Vec<_> = view.markers().iter().map(|m| m.fid.clone()).collect();

        assert_eq!(first, second);
        assert_eq!(view.clusters(24.0).len(), 2);
    }

    #[test]
    fn test_popup_omits_empty_fields() {
        let props = EventProperties {
            event_type: Some("Riots".to_string()),
            event_date: Some("01-May-2021".to_string()),
            fatalities: Some(0.0),
            ..Default::default()
        };
        let popup = build_popup(&props);
        assert!(popup.starts_with("Riots"));
        assert!(popup.contains("Date: 01-May-2021"));
        assert!(!popup.contains("Deaths"));
        assert!(!popup.contains("Source"));
    }
}
