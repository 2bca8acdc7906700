use crate::core::config::AtlasConfig;
use crate::data::feature::EventCollection;
use crate::render::views::{
    charts::{
        DisorderFlowChart, EventTypeDonut, FatalityChart, SubEventChart, TimelineChart,
        TopRegionChart, WeekdayRadar, YearMonthGrid,
    },
    controls::ControlPanel,
    heat::HeatView,
    indicators::IndicatorPanel,
    list::RecentList,
    markers::MarkerView,
};
use crate::render::{RenderSnapshot, ViewRenderer};

/// Owns every view renderer and fans one filtered snapshot out to all of
/// them in a fixed order.
///
/// Renderers are independent: none depends on side effects of an earlier
/// one, and all observe the same snapshot. A failing renderer is logged
/// and skipped; one bad surface never aborts the whole pass.
pub struct RenderDispatcher {
    pub donut: EventTypeDonut,
    pub timeline: TimelineChart,
    pub sub_events: SubEventChart,
    pub indicators: IndicatorPanel,
    pub regions: TopRegionChart,
    pub markers: MarkerView,
    pub heat: HeatView,
    pub recent: RecentList,
    pub weekdays: WeekdayRadar,
    pub flows: DisorderFlowChart,
    pub fatalities: FatalityChart,
    pub calendar: YearMonthGrid,
    pub controls: ControlPanel,
}

impl RenderDispatcher {
    /// Builds the view stack; control choices come from the full
    /// collection, everything else starts empty until the first render.
    pub fn new(config: &AtlasConfig, events: &EventCollection) -> Self {
        Self {
            donut: EventTypeDonut::default(),
            timeline: TimelineChart::default(),
            sub_events: SubEventChart::default(),
            indicators: IndicatorPanel::default(),
            regions: TopRegionChart::default(),
            markers: MarkerView::new(config.clustering.clone()),
            heat: HeatView::new(config.heat.clone()),
            recent: RecentList::new(config.list_limit),
            weekdays: WeekdayRadar::default(),
            flows: DisorderFlowChart::default(),
            fatalities: FatalityChart::default(),
            calendar: YearMonthGrid::default(),
            controls: ControlPanel::from_collection(events),
        }
    }

    /// Invokes every renderer with the same snapshot, in a fixed order.
    pub fn render_all(&mut self, snapshot: &RenderSnapshot<'_>) {
        for view in self.views_mut() {
            if let Err(e) = view.render(snapshot) {
                log::warn!("renderer '{}' failed: {e}", view.name());
            }
        }
    }

    /// The fixed render order
    fn views_mut(&mut self) -> [&mut dyn ViewRenderer; 13] {
        [
            &mut self.donut,
            &mut self.timeline,
            &mut self.sub_events,
            &mut self.indicators,
            &mut self.regions,
            &mut self.markers,
            &mut self.heat,
            &mut self.recent,
            &mut self.weekdays,
            &mut self.flows,
            &mut self.fatalities,
            &mut self.calendar,
            &mut self.controls,
        ]
    }
}
