use crate::data::feature::EventCollection;
use crate::filter::{ActiveFilter, Selection};
use crate::prelude::HashSet;
use crate::render::style::UNKNOWN;
use crate::render::{RenderSnapshot, ViewRenderer};
use crate::Result;

/// The filter controls' state: available choices plus the currently
/// selected values.
///
/// Choices are derived from the FULL collection once at load (a narrowed
/// filter must not shrink the pill row); selections are resynchronized
/// from the active filter on every render pass so programmatic filter
/// changes are reflected too.
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    /// Disorder-type pill labels, "All" first, in first-seen order
    pub disorder_pills: Vec<String>,
    /// Years available in the dropdown, newest first
    pub years: Vec<i32>,
    pub selected_disorder: Selection<String>,
    pub selected_event_type: Selection<String>,
    pub selected_year: Selection<i32>,
}

impl ControlPanel {
    /// Builds the choice lists from the full event collection
    pub fn from_collection(events: &EventCollection) -> Self {
        let mut pills = vec!["All".to_string()];
        let mut seen: HashSet<&str> = HashSet::default();
        for feature in events.iter() {
            let disorder = feature
                .properties
                .disorder_type
                .as_deref()
                .unwrap_or(UNKNOWN);
            if seen.insert(disorder) {
                pills.push(disorder.to_string());
            }
        }

        let mut years: Vec<i32> = events
            .iter()
            .filter_map(|f| f.properties.effective_year())
            .collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();

        Self {
            disorder_pills: pills,
            years,
            ..Default::default()
        }
    }

    /// Label of the active disorder pill
    pub fn active_pill(&self) -> &str {
        match &self.selected_disorder {
            Selection::All => "All",
            Selection::Only(v) => v,
        }
    }

    fn sync(&mut self, filter: &ActiveFilter) {
        self.selected_disorder = filter.disorder.clone();
        self.selected_event_type = filter.event_type.clone();
        self.selected_year = filter.year.clone();
    }
}

impl ViewRenderer for ControlPanel {
    fn name(&self) -> &str {
        "controls"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        self.sync(snapshot.filter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::EventProperties;

    fn collection() -> EventCollection {
        let with = |disorder: Option<&str>, year: i64| EventProperties {
            disorder_type: disorder.map(|s| s.to_string()),
            year: Some(year),
            ..Default::default()
        };
        EventCollection::from_features(vec![
            (None, None, with(Some("Political violence"), 2020)),
            (None, None, with(Some("Demonstrations"), 2021)),
            (None, None, with(Some("Political violence"), 2021)),
            (None, None, with(None, 2019)),
        ])
    }

    #[test]
    fn test_choices_from_full_collection() {
        let panel = ControlPanel::from_collection(&collection());
        assert_eq!(
            panel.disorder_pills,
            vec!["All", "Political violence", "Demonstrations", UNKNOWN]
        );
        assert_eq!(panel.years, vec![2021, 2020, 2019]);
        assert_eq!(panel.active_pill(), "All");
    }

    #[test]
    fn test_sync_reflects_filter() {
        let events = collection();
        let mut panel = ControlPanel::from_collection(&events);

        let mut filter = ActiveFilter::default();
        filter.disorder = Selection::Only("Demonstrations".to_string());
        filter.year = Selection::Only(2021);

        panel
            .render(&RenderSnapshot {
                features: events.features(),
                filter: &filter,
            })
            .unwrap();

        assert_eq!(panel.active_pill(), "Demonstrations");
        assert_eq!(panel.selected_year, Selection::Only(2021));
        // Choice lists are untouched by a narrowed filter
        assert_eq!(panel.disorder_pills.len(), 4);
    }
}
