use crate::core::config::ClusteringConfig;
use crate::core::geo::LatLng;
use crate::prelude::HashMap;
use crate::spatial::index::{SpatialIndex, SpatialItem};

/// One rendered cluster bubble: a screen-space group of nearby markers.
#[derive(Debug, Clone)]
pub struct ClusterBubble {
    /// Mean position of the clustered markers
    pub center: LatLng,
    pub count: usize,
    /// Bubble diameter in pixels, stepped by count
    pub size_px: f64,
    /// Identifiers of the clustered features
    pub fids: Vec<String>,
}

impl ClusterBubble {
    pub fn is_single(&self) -> bool {
        self.count == 1
    }
}

/// Grid-based marker clustering over an R-tree of marker positions.
///
/// Markers are bucketed by screen-space grid cell at the current zoom;
/// above the configured cutoff zoom every marker stands alone.
pub struct MarkerClusterer {
    config: ClusteringConfig,
    index: SpatialIndex<LatLng>,
}

impl MarkerClusterer {
    pub fn new(config: ClusteringConfig) -> Self {
        Self {
            config,
            index: SpatialIndex::new(),
        }
    }

    /// Adds a marker position keyed by its feature identifier
    pub fn insert(&mut self, fid: String, position: LatLng) {
        self.index
            .insert(SpatialItem::from_lat_lng(fid, position, position));
    }

    /// Removes every marker
    pub fn clear(&mut self) {
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Buckets all markers into cluster bubbles at the given zoom level.
    /// Returns singletons as count-1 bubbles so the caller can draw them
    /// as plain markers.
    pub fn clusters(&self, zoom: f64) -> Vec<ClusterBubble> {
        if zoom >= self.config.disable_clustering_at_zoom {
            return self
                .index
                .all_items()
                .map(|item| ClusterBubble {
                    center: item.data,
                    count: 1,
                    size_px: bubble_size(1),
                    fids: vec![item.id.clone()],
                })
                .collect();
        }

        let grid_size = self.config.grid_size;
        let mut grid: HashMap<(i64, i64), Vec<&SpatialItem<LatLng>>> = HashMap::default();

        for item in self.index.all_items() {
            let pixel = item.data.project_pixel(zoom);
            let cell = (
                (pixel.x / grid_size).floor() as i64,
                (pixel.y / grid_size).floor() as i64,
            );
            grid.entry(cell).or_default().push(item);
        }

        grid.into_values()
            .map(|items| {
                let count = items.len();
                let lat = items.iter().map(|i| i.data.lat).sum::<f64>() / count as f64;
                let lng = items.iter().map(|i| i.data.lng).sum::<f64>() / count as f64;
                ClusterBubble {
                    center: LatLng::new(lat, lng),
                    count,
                    size_px: bubble_size(count),
                    fids: items.into_iter().map(|i| i.id.clone()).collect(),
                }
            })
            .collect()
    }
}

impl Default for MarkerClusterer {
    fn default() -> Self {
        Self::new(ClusteringConfig::default())
    }
}

/// Bubble diameter stepped by marker count
fn bubble_size(count: usize) -> f64 {
    if count >= 100 {
        50.0
    } else if count >= 10 {
        40.0
    } else {
        34.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusterer_with_two_groups() -> MarkerClusterer {
        let mut c = MarkerClusterer::default();
        // Tight group near Abuja
        c.insert("1".into(), LatLng::new(9.0500, 7.4900));
        c.insert("2".into(), LatLng::new(9.0501, 7.4901));
        c.insert("3".into(), LatLng::new(9.0502, 7.4902));
        // Lone marker far away
        c.insert("4".into(), LatLng::new(10.5000, 8.5000));
        c
    }

    #[test]
    fn test_groups_at_low_zoom() {
        let clusters = clusterer_with_two_groups().clusters(8.0);
        assert_eq!(clusters.len(), 2);

        let counts: Vec<usize> = {
            let mut v: Vec<_> = clusters.iter().map(|c| c.count).collect();
            v.sort();
            v
        };
        assert_eq!(counts, vec![1, 3]);
    }

    #[test]
    fn test_singles_above_cutoff_zoom() {
        let clusters = clusterer_with_two_groups().clusters(24.0);
        assert_eq!(clusters.len(), 4);
        assert!(clusters.iter().all(|c| c.is_single()));
    }

    #[test]
    fn test_bubble_size_steps() {
        assert_eq!(bubble_size(3), 34.0);
        assert_eq!(bubble_size(10), 40.0);
        assert_eq!(bubble_size(99), 40.0);
        assert_eq!(bubble_size(100), 50.0);
    }

    #[test]
    fn test_clear() {
        let mut c = clusterer_with_two_groups();
        c.clear();
        assert!(c.is_empty());
        assert!(c.clusters(8.0).is_empty());
    }
}
