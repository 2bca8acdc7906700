//! # Crisis Atlas
//!
//! A Rust-native dashboard engine for geocoded conflict-event data.
//!
//! The heart of the crate is a filter-and-render pipeline: one immutable
//! event collection is narrowed by attribute predicates plus an optional
//! user-drawn spatial region, and the filtered subset is fanned out to a
//! fixed set of view renderers (map markers with clustering, heat density,
//! linked charts, indicator counters, a recent-events list). An optional
//! egui dashboard sits on top of the pipeline.

pub mod core;
pub mod data;
pub mod filter;
pub mod render;
pub mod session;
pub mod spatial;
#[cfg(feature = "egui")]
pub mod ui;

pub mod prelude;

// Re-export public API
pub use crate::core::{
    config::AtlasConfig,
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

pub use crate::render::{dispatcher::RenderDispatcher, RenderSnapshot, ViewRenderer};

pub use crate::session::DashboardSession;

pub use crate::spatial::{clustering::MarkerClusterer, index::SpatialIndex};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = AtlasError;

/// Initializes `env_logger`-backed logging for binaries. Safe to call
/// more than once; later calls are no-ops.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
