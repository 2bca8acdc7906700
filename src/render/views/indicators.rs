use crate::render::{RenderSnapshot, ViewRenderer};
use crate::Result;

/// The headline counters: total events and total fatalities in the
/// filtered collection. Missing fatality fields count as zero.
#[derive(Debug, Default)]
pub struct IndicatorPanel {
    pub total_events: usize,
    pub total_fatalities: u64,
}

impl ViewRenderer for IndicatorPanel {
    fn name(&self) -> &str {
        "indicators"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        self.total_events = snapshot.features.len();
        self.total_fatalities = snapshot
            .features
            .iter()
            .filter_map(|f| f.properties.fatalities)
            .sum::<f64>() as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::{EventCollection, EventProperties};
    use crate::filter::ActiveFilter;

    #[test]
    fn test_totals() {
        let events = EventCollection::from_features(vec![
            (
                None,
                None,
                EventProperties {
                    fatalities: Some(3.0),
                    ..Default::default()
                },
            ),
            (
                None,
                None,
                EventProperties {
                    fatalities: Some(2.0),
                    ..Default::default()
                },
            ),
            (None, None, EventProperties::default()),
        ]);

        let filter = ActiveFilter::default();
        let mut panel = IndicatorPanel::default();
        panel
            .render(&RenderSnapshot {
                features: events.features(),
                filter: &filter,
            })
            .unwrap();

        assert_eq!(panel.total_events, 3);
        assert_eq!(panel.total_fatalities, 5);
    }

    #[test]
    fn test_empty_zero_state() {
        let filter = ActiveFilter::default();
        let mut panel = IndicatorPanel::default();
        panel
            .render(&RenderSnapshot {
                features: &[],
                filter: &filter,
            })
            .unwrap();

        assert_eq!(panel.total_events, 0);
        assert_eq!(panel.total_fatalities, 0);
    }
}
