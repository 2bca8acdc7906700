//! The render side of the pipeline: a dispatcher fanning one filtered
//! snapshot out to every view renderer in a fixed order.

pub mod dispatcher;
pub mod style;
pub mod views;

use crate::data::feature::EventFeature;
use crate::filter::ActiveFilter;
use crate::Result;
use std::sync::Arc;

/// Read-only view of the filtered collection handed to every renderer for
/// the duration of one render call. Renderers must not retain it.
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    /// The filtered subset, in original collection order
    pub features: &'a [Arc<EventFeature>],
    /// The filter that produced the subset, for control resynchronization
    pub filter: &'a ActiveFilter,
}

/// One visual surface fed from the filtered collection.
///
/// Implementations must be idempotent: rendering the same snapshot twice
/// leaves the surface in the same end state as rendering it once. Each
/// render fully replaces the previous state; nothing is diffed.
pub trait ViewRenderer {
    fn name(&self) -> &str;

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()>;
}
