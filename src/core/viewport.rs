use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};

/// The current camera over the map: center, zoom and pixel size.
///
/// The dashboard pipeline only ever issues whole-view requests against it
/// (`set_view`, `pan_to`, `fit_bounds`); nothing animates it incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    /// Size of the drawable area in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom,
            size,
            min_zoom: 1.0,
            max_zoom: 19.0,
        }
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Fits the view to the given bounds with the given pixel padding,
    /// picking the largest integer zoom at which the bounds fit.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) {
        let usable = Point::new(
            (self.size.x - 2.0 * padding).max(1.0),
            (self.size.y - 2.0 * padding).max(1.0),
        );

        let mut best_zoom = self.min_zoom;
        for z in (self.min_zoom.ceil() as i32)..=(self.max_zoom.floor() as i32) {
            let zoom = z as f64;
            let nw = LatLng::new(bounds.north_east.lat, bounds.south_west.lng).project_pixel(zoom);
            let se = LatLng::new(bounds.south_west.lat, bounds.north_east.lng).project_pixel(zoom);

            let width = (se.x - nw.x).abs();
            let height = (se.y - nw.y).abs();
            if width <= usable.x && height <= usable.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        log::debug!("fit_bounds -> center={:?} zoom={}", bounds.center(), best_zoom);
        self.center = bounds.center();
        self.zoom = best_zoom;
    }

    /// Converts a geographic coordinate to screen pixels relative to the
    /// top-left corner of the viewport.
    pub fn to_screen(&self, coord: &LatLng) -> Point {
        let origin = self.pixel_origin();
        coord.project_pixel(self.zoom).subtract(&origin)
    }

    /// Converts screen pixels (relative to the viewport top-left corner)
    /// back to a geographic coordinate.
    pub fn from_screen(&self, screen: Point) -> LatLng {
        let origin = self.pixel_origin();
        LatLng::unproject_pixel(screen.add(&origin), self.zoom)
    }

    /// World-pixel coordinate of the viewport's top-left corner
    fn pixel_origin(&self) -> Point {
        let center_px = self.center.project_pixel(self.zoom);
        Point::new(center_px.x - self.size.x / 2.0, center_px.y - self.size.y / 2.0)
    }

    /// Geographic bounds currently visible
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.from_screen(Point::new(0.0, 0.0));
        let se = self.from_screen(Point::new(self.size.x, self.size.y));
        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 2.0, Point::new(1024.0, 768.0))
    }
}
