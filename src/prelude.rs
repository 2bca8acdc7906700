//! Prelude module for common crisis-atlas types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use crisis_atlas::prelude::*;`

pub use crate::core::{
    config::{AtlasConfig, ClusteringConfig, HeatConfig},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use crate::data::{
    feature::{EventCollection, EventFeature, EventProperties},
    geometry::Geometry,
};

pub use crate::filter::{
    region::{DrawnShape, RegionTracker, SpatialRegion},
    ActiveFilter, FilterUpdate, Selection,
};

pub use crate::render::{
    dispatcher::RenderDispatcher,
    style::{type_style, TypeStyle},
    RenderSnapshot, ViewRenderer,
};

pub use crate::session::DashboardSession;

pub use crate::spatial::{
    clustering::{ClusterBubble, MarkerClusterer},
    index::{SpatialIndex, SpatialItem},
};

#[cfg(feature = "egui")]
pub use crate::ui::DashboardApp;

pub use crate::{Error as AtlasError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
