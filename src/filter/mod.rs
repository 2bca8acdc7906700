//! Attribute predicates and the combined filter evaluation.
//!
//! A feature passes when every attribute field of the [`ActiveFilter`]
//! accepts it AND it lies within the active spatial region, if any.
//! Evaluation short-circuits on the first failing predicate.

pub mod region;

use crate::data::feature::EventFeature;
use crate::data::geometry::Geometry;
use region::SpatialRegion;
use serde::{Deserialize, Serialize};

/// A single filter field: match everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// True when the field accepts the given (possibly missing) value.
    /// `All` accepts anything, including a missing attribute.
    pub fn accepts(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Toggle semantics for chart-slice clicks: selecting the already
    /// active value resets the field to `All`.
    pub fn toggled(&self, value: T) -> Selection<T> {
        match self {
            Selection::Only(current) if *current == value => Selection::All,
            _ => Selection::Only(value),
        }
    }
}

/// The active attribute-predicate selection. Defaults to match-all on
/// every field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub event_type: Selection<String>,
    pub disorder: Selection<String>,
    pub year: Selection<i32>,
}

impl ActiveFilter {
    /// Merges a partial update: fields absent from the update are left
    /// unchanged.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(event_type) = update.event_type {
            self.event_type = event_type;
        }
        if let Some(disorder) = update.disorder {
            self.disorder = disorder;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
    }
}

/// A partial filter change; `None` fields are left untouched by
/// [`ActiveFilter::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub event_type: Option<Selection<String>>,
    pub disorder: Option<Selection<String>>,
    pub year: Option<Selection<i32>>,
}

impl FilterUpdate {
    pub fn event_type(value: Selection<String>) -> Self {
        Self {
            event_type: Some(value),
            ..Default::default()
        }
    }

    pub fn disorder(value: Selection<String>) -> Self {
        Self {
            disorder: Some(value),
            ..Default::default()
        }
    }

    pub fn year(value: Selection<i32>) -> Self {
        Self {
            year: Some(value),
            ..Default::default()
        }
    }
}

/// Evaluates one feature against the active filter and spatial region.
///
/// Order of evaluation, short-circuiting on the first failure: event type,
/// disorder type, year (explicit field first, parsed date as fallback; a
/// feature with neither fails only a specific-year request), then spatial
/// containment/intersection. A feature without geometry never matches an
/// active region.
pub fn matches(
    feature: &EventFeature,
    filter: &ActiveFilter,
    region: Option<&SpatialRegion>,
) -> bool {
    let props = &feature.properties;

    if !filter.event_type.accepts(props.event_type.as_ref()) {
        return false;
    }
    if !filter.disorder.accepts(props.disorder_type.as_ref()) {
        return false;
    }
    if let Selection::Only(year) = filter.year {
        if props.effective_year() != Some(year) {
            return false;
        }
    }

    if let Some(region) = region {
        return match &feature.geometry {
            None => false,
            Some(Geometry::Point { .. }) => feature
                .position()
                .map(|p| region.contains(&p))
                .unwrap_or(false),
            Some(other) => region.intersects(other),
        };
    }

    true
}
