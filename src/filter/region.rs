use crate::core::geo::{LatLng, LatLngBounds};
use crate::data::geometry::Geometry;
use geo::{Contains, Intersects};
use serde::{Deserialize, Serialize};

/// Vertex count used when approximating a drawn circle as a polygon
const CIRCLE_STEPS: usize = 64;

/// A shape completed by the user with one of the draw tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawnShape {
    /// Center plus radius in meters
    Circle { center: LatLng, radius: f64 },
    Rectangle(LatLngBounds),
    /// Vertex ring; the closing vertex is implied
    Polygon(Vec<LatLng>),
}

/// The user-drawn geometry acting as an additional AND-ed predicate:
/// point features must lie inside it, other geometries must intersect it.
#[derive(Debug, Clone)]
pub struct SpatialRegion {
    shape: DrawnShape,
    boundary: geo_types::Polygon<f64>,
    bounds: LatLngBounds,
}

impl SpatialRegion {
    /// Converts a completed shape into a plain polygon region. Circles are
    /// approximated with a fixed-vertex ring at the drawn center and
    /// radius; rectangles and polygons use their own boundary directly.
    pub fn from_shape(shape: &DrawnShape) -> Self {
        let ring: Vec<LatLng> = match shape {
            DrawnShape::Circle { center, radius } => (0..CIRCLE_STEPS)
                .map(|i| center.destination(i as f64 * 360.0 / CIRCLE_STEPS as f64, *radius))
                .collect(),
            DrawnShape::Rectangle(bounds) => {
                let sw = bounds.south_west;
                let ne = bounds.north_east;
                vec![
                    sw,
                    LatLng::new(sw.lat, ne.lng),
                    ne,
                    LatLng::new(ne.lat, sw.lng),
                ]
            }
            DrawnShape::Polygon(vertices) => vertices.clone(),
        };

        let bounds = LatLngBounds::covering(ring.iter().copied())
            .unwrap_or_else(|| LatLngBounds::new(LatLng::default(), LatLng::default()));

        let exterior: Vec<geo_types::Coord<f64>> = ring
            .iter()
            .map(|p| geo_types::Coord { x: p.lng, y: p.lat })
            .collect();
        let boundary = geo_types::Polygon::new(geo_types::LineString::from(exterior), vec![]);

        Self {
            shape: shape.clone(),
            boundary,
            bounds,
        }
    }

    /// The shape the region was drawn as (for outlining in the UI)
    pub fn shape(&self) -> &DrawnShape {
        &self.shape
    }

    /// Bounding box of the region, for viewport fitting
    pub fn bounds(&self) -> &LatLngBounds {
        &self.bounds
    }

    /// Point-in-region test for point features
    pub fn contains(&self, point: &LatLng) -> bool {
        self.boundary
            .contains(&geo_types::Point::new(point.lng, point.lat))
    }

    /// Intersection test for non-point features
    pub fn intersects(&self, geometry: &Geometry) -> bool {
        self.boundary.intersects(&geometry.to_geo())
    }
}

/// Owns at most one drawn region. Drawing a new shape always replaces the
/// previous one; clearing twice has no additional effect.
#[derive(Debug, Clone, Default)]
pub struct RegionTracker {
    region: Option<SpatialRegion>,
}

impl RegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous region with the newly drawn shape and returns
    /// a reference to it.
    pub fn set(&mut self, shape: &DrawnShape) -> &SpatialRegion {
        log::debug!("spatial region replaced: {:?}", shape);
        self.region.insert(SpatialRegion::from_shape(shape))
    }

    /// Discards the region; idempotent.
    pub fn clear(&mut self) {
        self.region = None;
    }

    pub fn region(&self) -> Option<&SpatialRegion> {
        self.region.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.region.is_some()
    }
}
