use crate::core::config::AtlasConfig;
use crate::data::feature::EventCollection;
use crate::filter::Selection;
use crate::render::style::Legend;
use crate::session::DashboardSession;
use crate::ui::locate::{EnvLocationProvider, LocateHandle, LocateOutcome, LocationProvider};
use crate::ui::map_panel::MapPanel;
use crate::ui::splash::SplashScreen;
use crate::ui::{color32, plots};
use egui::{Align2, Color32, RichText, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ChartTab {
    #[default]
    Overview,
    Breakdown,
    Trends,
}

/// The full dashboard window: filter controls on top, indicators and the
/// recent-events list on the left, the map in the center and the linked
/// charts on the right.
pub struct DashboardApp {
    session: DashboardSession,
    map: MapPanel,
    splash: SplashScreen,
    locate: LocateHandle,
    locate_notice: Option<String>,
    tab: ChartTab,
    legend: Legend,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, events: EventCollection) -> Self {
        Self::with_config(cc, AtlasConfig::default(), events)
    }

    pub fn with_config(
        cc: &eframe::CreationContext<'_>,
        config: AtlasConfig,
        events: EventCollection,
    ) -> Self {
        Self {
            session: DashboardSession::new(config, events),
            map: MapPanel::new(),
            splash: SplashScreen::from_storage(cc.storage),
            locate: LocateHandle::new(),
            locate_notice: None,
            tab: ChartTab::default(),
            legend: Legend::new(),
        }
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    /// Starts a locate-me lookup; the result only moves the viewport.
    pub fn locate_with<P: LocationProvider>(&mut self, provider: P) {
        self.locate_notice = None;
        self.locate.request(provider);
    }

    fn filter_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            // Disorder pills, derived once from the full collection
            let pills = self.session.views.controls.disorder_pills.clone();
            let active = self.session.views.controls.active_pill().to_string();
            for pill in pills {
                if ui.selectable_label(active == pill, &pill).clicked() {
                    let selection = if pill == "All" {
                        Selection::All
                    } else {
                        Selection::Only(pill.clone())
                    };
                    self.session
                        .set_filter(crate::filter::FilterUpdate::disorder(selection));
                }
            }

            ui.separator();

            let years = self.session.views.controls.years.clone();
            let mut selected = self.session.views.controls.selected_year.clone();
            let label = match &selected {
                Selection::All => "All years".to_string(),
                Selection::Only(y) => y.to_string(),
            };
            egui::ComboBox::from_id_source("year_select")
                .selected_text(label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected, Selection::All, "All years");
                    for year in years {
                        ui.selectable_value(&mut selected, Selection::Only(year), year.to_string());
                    }
                });
            if selected != self.session.views.controls.selected_year {
                self.session.set_year(selected);
            }

            ui.separator();
            if ui.button("Reset filters").clicked() {
                self.session.clear_all();
            }
            let locate_label = if self.locate.is_pending() {
                "Locating..."
            } else {
                "Locate me"
            };
            if ui
                .add_enabled(!self.locate.is_pending(), egui::Button::new(locate_label))
                .clicked()
            {
                self.locate_with(EnvLocationProvider);
            }
            if ui.button("Help").clicked() {
                self.splash.open();
            }
        });
    }

    fn legend_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Legend");
        let active = self.session.filter().event_type.clone();
        let mut toggle = None;
        for (name, fill) in &self.legend.entries {
            let selected = active == Selection::Only(name.to_string());
            ui.horizontal(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::Vec2::splat(10.0), egui::Sense::hover());
                ui.painter_at(rect).rect_filled(rect, 2.0, color32(fill));
                if ui.selectable_label(selected, *name).clicked() {
                    toggle = Some(name.to_string());
                }
            });
        }
        if let Some(name) = toggle {
            self.session.toggle_event_type(&name);
        }
    }

    fn sidebar(&mut self, ui: &mut egui::Ui) {
        let indicators = &self.session.views.indicators;
        ui.heading("Crisis Atlas");
        ui.label(
            RichText::new(format!("{} events", indicators.total_events))
                .size(22.0)
                .strong(),
        );
        ui.label(format!("{} fatalities", indicators.total_fatalities));
        ui.separator();

        self.legend_panel(ui);
        ui.separator();

        ui.heading("Recent events");
        let mut focus = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in &self.session.views.recent.rows {
                let text = format!("{}  {}", row.iso_date(), row.title);
                let label = RichText::new(text).color(color32(row.color));
                if ui.selectable_label(false, label).clicked() {
                    focus = Some(row.fid.clone());
                }
            }
        });
        if let Some(fid) = focus {
            self.session.focus_feature(&fid);
        }
    }

    fn charts(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (tab, label) in [
                (ChartTab::Overview, "Overview"),
                (ChartTab::Breakdown, "Breakdown"),
                (ChartTab::Trends, "Trends"),
            ] {
                if ui.selectable_label(self.tab == tab, label).clicked() {
                    self.tab = tab;
                }
            }
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
            ChartTab::Overview => {
                ui.label("Events by type");
                if let Some(label) = plots::donut(ui, &self.session.views.donut) {
                    self.session.toggle_event_type(&label);
                }
                ui.separator();
                ui.label("Events per year");
                plots::timeline(ui, &self.session.views.timeline);
                ui.separator();
                ui.label("Top regions");
                plots::top_regions(ui, &self.session.views.regions);
            }
            ChartTab::Breakdown => {
                ui.label("Sub-event types");
                plots::sub_events(ui, &self.session.views.sub_events);
                ui.separator();
                ui.label("Disorder to event type");
                plots::flows(ui, &self.session.views.flows);
                ui.separator();
                ui.label("Fatalities by type");
                plots::fatalities(ui, &self.session.views.fatalities);
            }
            ChartTab::Trends => {
                ui.label("Day of week");
                plots::weekday_radar(ui, &self.session.views.weekdays);
                ui.separator();
                ui.label("Monthly activity");
                plots::calendar(ui, &self.session.views.calendar);
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.locate.poll() {
            Some(LocateOutcome::Position(position)) => {
                let zoom = self.session.viewport.zoom.max(12.0);
                self.session.viewport.set_view(position, zoom);
                self.locate_notice = None;
            }
            Some(LocateOutcome::Failed) => {
                self.locate_notice =
                    Some("Could not determine your location.".to_string());
            }
            None => {}
        }

        egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
            self.filter_bar(ui);
        });

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                self.sidebar(ui);
            });

        egui::SidePanel::right("charts")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.charts(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.label(
                    RichText::new(format!(
                        "Center: {:.4}, {:.4} | Zoom: {:.1}",
                        self.session.viewport.center.lat,
                        self.session.viewport.center.lng,
                        self.session.viewport.zoom
                    ))
                    .color(Color32::from_gray(110)),
                );
            });
            self.map.ui(ui, &mut self.session);
        });

        // Non-blocking notice; the dashboard stays fully usable behind it
        if self.locate_notice.is_some() {
            let mut dismiss = false;
            egui::Window::new("Location")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-12.0, -12.0))
                .show(ctx, |ui| {
                    if let Some(notice) = &self.locate_notice {
                        ui.label(notice);
                    }
                    dismiss = ui.button("Dismiss").clicked();
                });
            if dismiss {
                self.locate_notice = None;
            }
        }

        self.splash.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.splash.persist(storage);
    }
}
