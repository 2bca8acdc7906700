use crate::render::style::{type_style, UNKNOWN};
use crate::render::{RenderSnapshot, ViewRenderer};
use crate::Result;
use chrono::NaiveDate;

/// One row of the recent-events list
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    /// Join key back to the map marker
    pub fid: String,
    pub date: NaiveDate,
    /// Sub-event type, falling back to event type
    pub title: String,
    /// Icon color from the shared palette
    pub color: &'static str,
}

impl ListRow {
    /// ISO `YYYY-MM-DD` date for display
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Ranked list of the most recent events. Features without a parseable
/// date are left out; the rest are sorted newest first and capped.
#[derive(Debug)]
pub struct RecentList {
    limit: usize,
    pub rows: Vec<ListRow>,
}

impl RecentList {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            rows: Vec::new(),
        }
    }
}

impl ViewRenderer for RecentList {
    fn name(&self) -> &str {
        "recent-list"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        self.rows.clear();
        for feature in snapshot.features {
            let Some(date) = feature.properties.parsed_date() else {
                continue;
            };
            let props = &feature.properties;
            let title = props
                .sub_event_type
                .clone()
                .or_else(|| props.event_type.clone())
                .unwrap_or_else(|| UNKNOWN.to_string());

            self.rows.push(ListRow {
                fid: feature.fid.clone(),
                date,
                title,
                color: type_style(props.event_type.as_deref()).fill,
            });
        }

        // Newest first; the sort is stable so same-day events keep their
        // collection order
        self.rows.sort_by(|a, b| b.date.cmp(&a.date));
        self.rows.truncate(self.limit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::{EventCollection, EventProperties};
    use crate::filter::ActiveFilter;

    fn dated(event_type: &str, sub_event: Option<&str>, date: &str) -> EventProperties {
        EventProperties {
            event_type: Some(event_type.to_string()),
            sub_event_type: sub_event.map(|s| s.to_string()),
            event_date: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_newest_first_and_capped() {
        let events = EventCollection::from_features(vec![
            (None, None, dated("Riots", None, "01-January-2020")),
            (None, None, dated("Battles", Some("Armed clash"), "05-July-2021")),
            (None, None, dated("Protests", None, "20-March-2021")),
            (
                None,
                None,
                EventProperties {
                    event_type: Some("Riots".to_string()),
                    event_date: Some("garbage".to_string()),
                    ..Default::default()
                },
            ),
        ]);

        let filter = ActiveFilter::default();
        let mut list = RecentList::new(2);
        list.render(&RenderSnapshot {
            features: events.features(),
            filter: &filter,
        })
        .unwrap();

        assert_eq!(list.rows.len(), 2);
        assert_eq!(list.rows[0].title, "Armed clash");
        assert_eq!(list.rows[0].iso_date(), "2021-07-05");
        assert_eq!(list.rows[1].title, "Protests");
    }

    #[test]
    fn test_title_falls_back_to_event_type() {
        let events = EventCollection::from_features(vec![(
            None,
            None,
            dated("Riots", None, "01-January-2020"),
        )]);

        let filter = ActiveFilter::default();
        let mut list = RecentList::new(10);
        list.render(&RenderSnapshot {
            features: events.features(),
            filter: &filter,
        })
        .unwrap();

        assert_eq!(list.rows[0].title, "Riots");
        assert_eq!(list.rows[0].color, "#f39c12");
        assert_eq!(list.rows[0].fid, "1");
    }
}
