use crate::core::config::HeatConfig;
use crate::core::geo::LatLng;
use crate::render::style::type_style;
use crate::render::{RenderSnapshot, ViewRenderer};
use crate::Result;

/// One weighted heat sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSample {
    pub position: LatLng,
    pub weight: f64,
}

/// The heat-density layer.
///
/// Unlike the other views this one updates in place: the sample buffer is
/// replaced wholesale on render, with no teardown, since the layer has no
/// per-point interactive state. A `paused` flag skips recomputation while
/// the layer is hidden; it is checked explicitly instead of relying on a
/// map library's internal redraw hooks.
pub struct HeatView {
    config: HeatConfig,
    samples: Vec<HeatSample>,
    paused: bool,
}

impl HeatView {
    pub fn new(config: HeatConfig) -> Self {
        Self {
            config,
            samples: Vec::new(),
            paused: false,
        }
    }

    pub fn samples(&self) -> &[HeatSample] {
        &self.samples
    }

    pub fn config(&self) -> &HeatConfig {
        &self.config
    }

    /// Pauses or resumes recomputation. While paused the previous sample
    /// set is retained untouched.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl ViewRenderer for HeatView {
    fn name(&self) -> &str {
        "heat"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        if self.paused {
            return Ok(());
        }

        self.samples.clear();
        for feature in snapshot.features {
            let Some(position) = feature.position() else {
                continue;
            };
            let weight = match feature.properties.event_type.as_deref() {
                Some(t) => type_style(Some(t)).heat_weight,
                None => self.config.default_weight,
            };
            self.samples.push(HeatSample { position, weight });
        }

        Ok(())
    }
}
