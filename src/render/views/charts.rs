//! Chart renderers: pure aggregations of the filtered snapshot into
//! drawable models. The egui layer only reads these; all bucket logic
//! lives here so it can be tested headless.

use crate::render::style::{type_style, UNKNOWN};
use crate::render::views::CategoryCounts;
use crate::render::{RenderSnapshot, ViewRenderer};
use crate::Result;
use chrono::Datelike;
use std::collections::BTreeMap;

/// Sub-event buckets smaller than this are grouped into "Others"
const OTHERS_THRESHOLD: f64 = 10.0;

/// Number of admin2 regions shown in the ranked bar chart
const TOP_REGIONS: usize = 10;

/// One donut slice
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: u64,
    pub color: &'static str,
}

/// Event-type donut. Clicking a slice toggles the event-type filter; the
/// click itself is routed through the session, the chart only carries the
/// slice models.
#[derive(Debug, Default)]
pub struct EventTypeDonut {
    pub slices: Vec<Slice>,
}

impl ViewRenderer for EventTypeDonut {
    fn name(&self) -> &str {
        "event-type-donut"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        let mut counts = CategoryCounts::new();
        for feature in snapshot.features {
            counts.bump(feature.properties.event_type.as_deref().unwrap_or(UNKNOWN));
        }

        self.slices = counts
            .into_pairs()
            .into_iter()
            .map(|(label, count)| Slice {
                color: type_style(Some(&label)).fill,
                label,
                count: count as u64,
            })
            .collect();
        Ok(())
    }
}

/// Events per year, year-sorted line chart
#[derive(Debug, Default)]
pub struct TimelineChart {
    pub points: Vec<(i32, u64)>,
}

impl ViewRenderer for TimelineChart {
    fn name(&self) -> &str {
        "timeline"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
        for feature in snapshot.features {
            if let Some(year) = feature.properties.effective_year() {
                *by_year.entry(year).or_insert(0) += 1;
            }
        }
        self.points = by_year.into_iter().collect();
        Ok(())
    }
}

/// Sub-event counts, with small buckets grouped into "Others"
#[derive(Debug, Default)]
pub struct SubEventChart {
    pub bars: Vec<(String, u64)>,
}

impl ViewRenderer for SubEventChart {
    fn name(&self) -> &str {
        "sub-events"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        let mut counts = CategoryCounts::new();
        for feature in snapshot.features {
            counts.bump(
                feature
                    .properties
                    .sub_event_type
                    .as_deref()
                    .unwrap_or(UNKNOWN),
            );
        }

        let mut others = 0.0;
        self.bars.clear();
        for (label, count) in counts.into_pairs() {
            if count < OTHERS_THRESHOLD {
                others += count;
            } else {
                self.bars.push((label, count as u64));
            }
        }
        if others > 0.0 {
            self.bars.push(("Others".to_string(), others as u64));
        }
        Ok(())
    }
}

/// Top-N admin2 regions by event count, descending
#[derive(Debug, Default)]
pub struct TopRegionChart {
    pub bars: Vec<(String, u64)>,
}

impl ViewRenderer for TopRegionChart {
    fn name(&self) -> &str {
        "top-regions"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        let mut counts = CategoryCounts::new();
        for feature in snapshot.features {
            counts.bump(feature.properties.admin2.as_deref().unwrap_or(UNKNOWN));
        }

        let mut pairs = counts.into_pairs();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs.truncate(TOP_REGIONS);
        self.bars = pairs
            .into_iter()
            .map(|(label, count)| (label, count as u64))
            .collect();
        Ok(())
    }
}

/// Day-of-week distribution, Sunday first. Features whose date cannot be
/// parsed are skipped.
#[derive(Debug, Default)]
pub struct WeekdayRadar {
    pub counts: [u64; 7],
}

impl WeekdayRadar {
    pub const LABELS: [&'static str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
}

impl ViewRenderer for WeekdayRadar {
    fn name(&self) -> &str {
        "weekday-radar"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        self.counts = [0; 7];
        for feature in snapshot.features {
            if let Some(date) = feature.properties.parsed_date() {
                self.counts[date.weekday().num_days_from_sunday() as usize] += 1;
            }
        }
        Ok(())
    }
}

/// One disorder-type to event-type transition
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub from: String,
    pub to: String,
    pub count: u64,
}

/// Disorder-type → event-type flow chart (sankey-style)
#[derive(Debug, Default)]
pub struct DisorderFlowChart {
    pub flows: Vec<Flow>,
}

impl ViewRenderer for DisorderFlowChart {
    fn name(&self) -> &str {
        "disorder-flows"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        let mut counts = CategoryCounts::new();
        for feature in snapshot.features {
            let from = feature
                .properties
                .disorder_type
                .as_deref()
                .unwrap_or(UNKNOWN);
            let to = feature.properties.event_type.as_deref().unwrap_or(UNKNOWN);
            counts.bump(&format!("{from}\u{1f}{to}"));
        }

        self.flows = counts
            .into_pairs()
            .into_iter()
            .filter_map(|(key, count)| {
                let (from, to) = key.split_once('\u{1f}')?;
                Some(Flow {
                    from: from.to_string(),
                    to: to.to_string(),
                    count: count as u64,
                })
            })
            .collect();
        Ok(())
    }
}

/// Fatality totals per event type, descending
#[derive(Debug, Default)]
pub struct FatalityChart {
    /// (event type, fatality total, palette color)
    pub bars: Vec<(String, f64, &'static str)>,
}

impl ViewRenderer for FatalityChart {
    fn name(&self) -> &str {
        "fatalities"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        let mut sums = CategoryCounts::new();
        for feature in snapshot.features {
            if let Some(fatalities) = feature.properties.fatalities {
                sums.add(
                    feature.properties.event_type.as_deref().unwrap_or(UNKNOWN),
                    fatalities,
                );
            }
        }

        let mut pairs = sums.into_pairs();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        self.bars = pairs
            .into_iter()
            .map(|(label, total)| {
                let color = type_style(Some(&label)).fill;
                (label, total, color)
            })
            .collect();
        Ok(())
    }
}

/// One cell of the year-by-month density grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub year: i32,
    /// Zero-based month, January = 0
    pub month: u32,
    pub count: u64,
}

/// Year × month density grid. Covers every month of every year seen in
/// the snapshot, including zero cells, so the grid renders as a full
/// rectangle.
#[derive(Debug, Default)]
pub struct YearMonthGrid {
    /// Years in ascending order
    pub years: Vec<i32>,
    /// Cells in row-major order (year rows, month columns)
    pub cells: Vec<GridCell>,
    /// Largest cell count, at least 1, for color scaling
    pub max_count: u64,
}

impl ViewRenderer for YearMonthGrid {
    fn name(&self) -> &str {
        "year-month-grid"
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<()> {
        let mut counts: BTreeMap<(i32, u32), u64> = BTreeMap::new();
        for feature in snapshot.features {
            if let Some(date) = feature.properties.parsed_date() {
                *counts.entry((date.year(), date.month0())).or_insert(0) += 1;
            }
        }

        self.years = {
            let mut years: Vec<i32> = counts.keys().map(|(y, _)| *y).collect();
            years.dedup();
            years
        };

        self.cells.clear();
        for &year in &self.years {
            for month in 0..12 {
                let count = counts.get(&(year, month)).copied().unwrap_or(0);
                self.cells.push(GridCell { year, month, count });
            }
        }
        self.max_count = counts.values().copied().max().unwrap_or(0).max(1);
        Ok(())
    }
}
