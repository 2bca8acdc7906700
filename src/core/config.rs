use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Marker clustering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Grid size for clustering, in pixels at the current zoom
    pub grid_size: f64,
    /// Zoom level at and above which clustering is disabled entirely
    pub disable_clustering_at_zoom: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            grid_size: 60.0,
            disable_clustering_at_zoom: 24.0,
        }
    }
}

/// Heat density layer parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatConfig {
    /// Radius of influence for each sample, in pixels
    pub radius: f64,
    /// Blur factor for smoother appearance
    pub blur: f64,
    /// Minimum opacity of the rendered layer
    pub min_opacity: f64,
    /// Weight used for event types without an entry in the style table
    pub default_weight: f64,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            radius: 25.0,
            blur: 15.0,
            min_opacity: 0.2,
            default_weight: 0.7,
        }
    }
}

/// Dashboard-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Initial map view before any data is fitted
    pub default_center: LatLng,
    pub default_zoom: f64,
    /// Padding applied when fitting the viewport to a bounding box, in pixels
    pub fit_padding: f64,
    /// Maximum number of rows in the recent-events list
    pub list_limit: usize,
    pub clustering: ClusteringConfig,
    pub heat: HeatConfig,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(9.05785, 7.49508),
            default_zoom: 12.0,
            fit_padding: 20.0,
            list_limit: 100,
            clustering: ClusteringConfig::default(),
            heat: HeatConfig::default(),
        }
    }
}
