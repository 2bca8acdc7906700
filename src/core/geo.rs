use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Size of one map tile in pixels, used by the slippy pixel projection.
const TILE_SIZE: f64 = 256.0;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Calculates the distance to another LatLng using the Haversine formula
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Great-circle destination point, `distance` meters away on the given
    /// bearing (degrees clockwise from north). Used to approximate drawn
    /// circles as polygons.
    pub fn destination(&self, bearing_deg: f64, distance: f64) -> LatLng {
        let ang = distance / EARTH_RADIUS;
        let brg = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lng1 = self.lng.to_radians();

        let lat2 = (lat1.sin() * ang.cos() + lat1.cos() * ang.sin() * brg.cos()).asin();
        let lng2 = lng1
            + (brg.sin() * ang.sin() * lat1.cos()).atan2(ang.cos() - lat1.sin() * lat2.sin());

        LatLng::new(lat2.to_degrees(), lng2.to_degrees())
    }

    /// Clamps latitude to the Web Mercator valid range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + Self::clamp_lat(self.lat).to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates LatLng from Web Mercator coordinates
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }

    /// Projects to slippy-map pixel coordinates at the given zoom level
    /// (y grows southwards, matching screen space).
    pub fn project_pixel(&self, zoom: f64) -> Point {
        let world = TILE_SIZE * 2_f64.powf(zoom);
        let lat_rad = Self::clamp_lat(self.lat).to_radians();

        let x = (self.lng + 180.0) / 360.0 * world;
        let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * world;
        Point::new(x, y)
    }

    /// Inverse of [`LatLng::project_pixel`]
    pub fn unproject_pixel(point: Point, zoom: f64) -> Self {
        let world = TILE_SIZE * 2_f64.powf(zoom);
        let lng = point.x / world * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * point.y / world)).sinh().atan().to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Builds the tightest bounds covering every point in the iterator,
    /// or `None` when the iterator is empty.
    pub fn covering<I: IntoIterator<Item = LatLng>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.extend(&p);
        }
        Some(bounds)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Merges another bounds into this one
    pub fn extend_bounds(&mut self, other: &LatLngBounds) {
        self.extend(&other.south_west);
        self.extend(&other.north_east);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Gets the span of the bounds
    pub fn span(&self) -> LatLng {
        LatLng::new(
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(9.05785, 7.49508);
        assert_eq!(coord.lat, 9.05785);
        assert_eq!(coord.lng, 7.49508);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_destination_round_trip() {
        let origin = LatLng::new(9.0, 7.5);
        let dest = origin.destination(90.0, 5000.0);

        // A 5 km hop east stays on the same parallel, give or take
        assert!((dest.lat - origin.lat).abs() < 0.01);
        assert!((origin.distance_to(&dest) - 5000.0).abs() < 5.0);
    }

    #[test]
    fn test_pixel_projection_round_trip() {
        let coord = LatLng::new(9.05785, 7.49508);
        let pixel = coord.project_pixel(12.0);
        let back = LatLng::unproject_pixel(pixel, 12.0);

        assert!((back.lat - coord.lat).abs() < 1e-6);
        assert!((back.lng - coord.lng).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_covering() {
        let bounds = LatLngBounds::covering(vec![
            LatLng::new(9.0, 7.0),
            LatLng::new(9.5, 7.8),
            LatLng::new(8.8, 7.4),
        ])
        .unwrap();

        assert_eq!(bounds.south_west, LatLng::new(8.8, 7.0));
        assert_eq!(bounds.north_east, LatLng::new(9.5, 7.8));
        assert!(bounds.contains(&LatLng::new(9.1, 7.5)));
        assert!(!bounds.contains(&LatLng::new(10.0, 7.5)));
    }

    #[test]
    fn test_bounds_covering_empty() {
        assert!(LatLngBounds::covering(std::iter::empty()).is_none());
    }
}
