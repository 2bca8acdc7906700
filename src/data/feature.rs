use crate::core::geo::{LatLng, LatLngBounds};
use crate::data::geometry::Geometry;
use crate::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Date formats seen in the upstream export. The dataset's native shape is
/// `15-March-2019`; ISO dates show up in hand-edited records.
const DATE_FORMATS: &[&str] = &["%d-%B-%Y", "%Y-%m-%d", "%d %B %Y"];

/// Typed attribute record of one event.
///
/// Every field is optional: a malformed record degrades per-field
/// (sentinel "Unknown" or exclusion from a single aggregate) instead of
/// failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventProperties {
    #[serde(default, alias = "EVENT_TYPE")]
    pub event_type: Option<String>,
    #[serde(default, alias = "SUB_EVENT_TYPE")]
    pub sub_event_type: Option<String>,
    #[serde(default, alias = "DISORDER_TYPE")]
    pub disorder_type: Option<String>,
    #[serde(default, alias = "INTERACTION", deserialize_with = "de_lenient_string")]
    pub interaction: Option<String>,
    #[serde(default, alias = "EVENT_DATE")]
    pub event_date: Option<String>,
    #[serde(default, alias = "YEAR", deserialize_with = "de_lenient_i64")]
    pub year: Option<i64>,
    #[serde(default, alias = "FATALITIES", deserialize_with = "de_lenient_f64")]
    pub fatalities: Option<f64>,
    #[serde(default, alias = "ADMIN2")]
    pub admin2: Option<String>,
    #[serde(default, alias = "SOURCE")]
    pub source: Option<String>,
    #[serde(default, alias = "ACTOR1")]
    pub actor1: Option<String>,
    #[serde(default, alias = "ACTOR2")]
    pub actor2: Option<String>,
    #[serde(default, alias = "NOTES")]
    pub notes: Option<String>,
    #[serde(default, alias = "OBJECTID", deserialize_with = "de_lenient_i64")]
    pub objectid: Option<i64>,
}

impl EventProperties {
    /// Parses the event date; `None` when absent or unparseable
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.event_date.as_deref()?;
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    /// Year a feature is filed under: the explicit YEAR field when present
    /// and valid, otherwise the year of the parsed event date. The explicit
    /// field wins even when both exist and disagree.
    pub fn effective_year(&self) -> Option<i32> {
        if let Some(y) = self.year {
            if let Ok(y) = i32::try_from(y) {
                return Some(y);
            }
        }
        self.parsed_date().map(|d| d.year())
    }
}

/// One geocoded event record: stable identifier, geometry, attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventFeature {
    /// Effective identifier, assigned once at load time. The sole join key
    /// between a list row / marker and its underlying feature.
    pub fid: String,
    pub geometry: Option<Geometry>,
    pub properties: EventProperties,
}

impl EventFeature {
    /// The marker position for point features
    pub fn position(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.as_point())
    }

    /// Bounding box of the feature's geometry
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.geometry.as_ref().and_then(|g| g.bounds())
    }
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: EventProperties,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

/// The full, ordered event dataset. Loaded once, never mutated in place;
/// features are shared behind `Arc` so a filtered subset is a cheap stable
/// subsequence of handles.
#[derive(Debug, Clone, Default)]
pub struct EventCollection {
    features: Vec<Arc<EventFeature>>,
}

impl EventCollection {
    /// Parses a GeoJSON feature collection and assigns each feature its
    /// effective identifier: explicit `id` field, then `OBJECTID`, then an
    /// auto-incrementing counter starting at 1. Identifiers never change
    /// for the lifetime of the loaded collection.
    pub fn from_json_str(geojson: &str) -> Result<Self> {
        let raw: RawCollection = serde_json::from_str(geojson)?;
        log::debug!("loaded {} raw features", raw.features.len());
        Ok(Self::assign_ids(raw.features))
    }

    /// Builds a collection from already-typed features, running the same
    /// identifier assignment as a JSON load.
    pub fn from_features(features: Vec<(Option<serde_json::Value>, Option<Geometry>, EventProperties)>) -> Self {
        Self::assign_ids(
            features
                .into_iter()
                .map(|(id, geometry, properties)| RawFeature {
                    id,
                    geometry,
                    properties,
                })
                .collect(),
        )
    }

    fn assign_ids(raw: Vec<RawFeature>) -> Self {
        let mut auto_id: u64 = 1;
        let features = raw
            .into_iter()
            .map(|f| {
                let fid = match (&f.id, f.properties.objectid) {
                    (Some(serde_json::Value::String(s)), _) => s.clone(),
                    (Some(serde_json::Value::Number(n)), _) => n.to_string(),
                    (_, Some(oid)) => oid.to_string(),
                    _ => {
                        let fid = auto_id.to_string();
                        auto_id += 1;
                        fid
                    }
                };
                Arc::new(EventFeature {
                    fid,
                    geometry: f.geometry,
                    properties: f.properties,
                })
            })
            .collect();
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[Arc<EventFeature>] {
        &self.features
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<EventFeature>> {
        self.features.iter()
    }

    /// Bounding box over every feature geometry, `None` when the
    /// collection has no located features
    pub fn bounds(&self) -> Option<LatLngBounds> {
        bounds_of(&self.features)
    }
}

/// Bounding box of a feature slice; used to fit the viewport after every
/// filter change.
pub fn bounds_of(features: &[Arc<EventFeature>]) -> Option<LatLngBounds> {
    let mut bounds: Option<LatLngBounds> = None;
    for feature in features {
        if let Some(b) = feature.bounds() {
            match bounds.as_mut() {
                Some(total) => total.extend_bounds(&b),
                None => bounds = Some(b),
            }
        }
    }
    bounds
}

// Upstream exports are inconsistent about numeric fields: YEAR and
// OBJECTID arrive as numbers or strings depending on the tool that wrote
// the file. These deserializers accept either.

fn de_lenient_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn de_lenient_i64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<i64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn de_lenient_f64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
