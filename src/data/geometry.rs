use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// GeoJSON geometry. Coordinates follow the GeoJSON convention of
/// `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

impl Geometry {
    /// The geographic position for point geometries, `None` otherwise
    pub fn as_point(&self) -> Option<LatLng> {
        match self {
            Geometry::Point { coordinates } => {
                Some(LatLng::new(coordinates[1], coordinates[0]))
            }
            _ => None,
        }
    }

    /// All vertex coordinates of the geometry (exterior rings only for
    /// polygons)
    pub fn points(&self) -> Vec<LatLng> {
        fn ring(coords: &[[f64; 2]], out: &mut Vec<LatLng>) {
            out.extend(coords.iter().map(|c| LatLng::new(c[1], c[0])));
        }

        let mut out = Vec::new();
        match self {
            Geometry::Point { coordinates } => out.push(LatLng::new(coordinates[1], coordinates[0])),
            Geometry::LineString { coordinates } | Geometry::MultiPoint { coordinates } => {
                ring(coordinates, &mut out)
            }
            Geometry::Polygon { coordinates } | Geometry::MultiLineString { coordinates } => {
                for line in coordinates {
                    ring(line, &mut out);
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    if let Some(exterior) = polygon.first() {
                        ring(exterior, &mut out);
                    }
                }
            }
        }
        out
    }

    /// Tight bounding box of the geometry, `None` for empty coordinate sets
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::covering(self.points())
    }

    /// Converts into a `geo` geometry for predicate evaluation
    /// (containment, intersection).
    pub fn to_geo(&self) -> geo_types::Geometry<f64> {
        fn coord(c: &[f64; 2]) -> geo_types::Coord<f64> {
            geo_types::Coord { x: c[0], y: c[1] }
        }
        fn line(coords: &[[f64; 2]]) -> geo_types::LineString<f64> {
            geo_types::LineString::from(coords.iter().map(coord).collect::<Vec<_>>())
        }
        fn polygon(rings: &[Vec<[f64; 2]>]) -> geo_types::Polygon<f64> {
            let exterior = rings.first().map(|r| line(r)).unwrap_or_else(|| line(&[]));
            let interiors = rings.iter().skip(1).map(|r| line(r)).collect();
            geo_types::Polygon::new(exterior, interiors)
        }

        match self {
            Geometry::Point { coordinates } => {
                geo_types::Point::new(coordinates[0], coordinates[1]).into()
            }
            Geometry::LineString { coordinates } => line(coordinates).into(),
            Geometry::Polygon { coordinates } => polygon(coordinates).into(),
            Geometry::MultiPoint { coordinates } => geo_types::MultiPoint::from(
                coordinates
                    .iter()
                    .map(|c| geo_types::Point::new(c[0], c[1]))
                    .collect::<Vec<_>>(),
            )
            .into(),
            Geometry::MultiLineString { coordinates } => geo_types::MultiLineString::new(
                coordinates.iter().map(|l| line(l)).collect(),
            )
            .into(),
            Geometry::MultiPolygon { coordinates } => geo_types::MultiPolygon::new(
                coordinates.iter().map(|p| polygon(p)).collect(),
            )
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_parsing() {
        let geom: Geometry =
            serde_json::from_str(r#"{"type":"Point","coordinates":[7.49508,9.05785]}"#).unwrap();
        assert_eq!(geom.as_point(), Some(LatLng::new(9.05785, 7.49508)));
    }

    #[test]
    fn test_polygon_bounds() {
        let geom = Geometry::Polygon {
            coordinates: vec![vec![[7.0, 9.0], [7.5, 9.0], [7.5, 9.4], [7.0, 9.4], [7.0, 9.0]]],
        };
        let bounds = geom.bounds().unwrap();
        assert_eq!(bounds.south_west, LatLng::new(9.0, 7.0));
        assert_eq!(bounds.north_east, LatLng::new(9.4, 7.5));
        assert!(geom.as_point().is_none());
    }

    #[test]
    fn test_to_geo_point_in_polygon() {
        use geo::Contains;

        let region = Geometry::Polygon {
            coordinates: vec![vec![[7.0, 9.0], [7.5, 9.0], [7.5, 9.4], [7.0, 9.4], [7.0, 9.0]]],
        };
        let geo_types::Geometry::Polygon(poly) = region.to_geo() else {
            panic!("expected polygon");
        };

        assert!(poly.contains(&geo_types::Point::new(7.2, 9.2)));
        assert!(!poly.contains(&geo_types::Point::new(8.0, 9.2)));
    }
}
