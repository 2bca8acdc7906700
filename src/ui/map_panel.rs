use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::filter::region::DrawnShape;
use crate::session::DashboardSession;
use crate::ui::color32;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

/// Pixel radius within which a click selects a marker
const MARKER_HIT_RADIUS: f32 = 8.0;
const MARKER_RADIUS: f32 = 5.0;
const SCROLL_ZOOM_FACTOR: f64 = 0.003;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawTool {
    #[default]
    Pan,
    Rectangle,
    Circle,
    Polygon,
}

/// Deferred user gesture, applied after painting so the paint pass can
/// borrow the session immutably.
enum MapAction {
    SetRegion(DrawnShape),
    ZoomToCluster(LatLng),
    SelectMarker(String),
}

/// The central map: markers with clustering, the heat layer, the drawn
/// region outline and the shape draw tools.
pub struct MapPanel {
    tool: DrawTool,
    drag_start: Option<LatLng>,
    polygon_draft: Vec<LatLng>,
    show_heat: bool,
    selected: Option<String>,
}

impl MapPanel {
    pub fn new() -> Self {
        Self {
            tool: DrawTool::Pan,
            drag_start: None,
            polygon_draft: Vec::new(),
            show_heat: true,
            selected: None,
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, session: &mut DashboardSession) {
        self.toolbar(ui, session);

        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        session
            .viewport
            .set_size(Point::new(rect.width() as f64, rect.height() as f64));

        let mut action = self.handle_input(ui, rect, &response, session);

        // Paint pass: reads only
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_rgb(0xe8, 0xec, 0xe4));

        if self.show_heat {
            self.paint_heat(&painter, rect, session);
        }
        self.paint_region(&painter, rect, session);
        if let Some(cluster_action) = self.paint_markers(&painter, rect, &response, session) {
            action = Some(cluster_action);
        }
        self.paint_draft(&painter, rect, session);
        self.paint_popup(ui.ctx(), rect, session);

        match action {
            Some(MapAction::SetRegion(shape)) => session.set_region(&shape),
            Some(MapAction::ZoomToCluster(center)) => {
                let zoom = session.viewport.zoom + 2.0;
                session.viewport.set_view(center, zoom);
            }
            Some(MapAction::SelectMarker(fid)) => self.selected = Some(fid),
            None => {}
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, session: &mut DashboardSession) {
        ui.horizontal(|ui| {
            for (tool, label) in [
                (DrawTool::Pan, "Pan"),
                (DrawTool::Rectangle, "Rectangle"),
                (DrawTool::Circle, "Circle"),
                (DrawTool::Polygon, "Polygon"),
            ] {
                if ui.selectable_label(self.tool == tool, label).clicked() {
                    self.tool = tool;
                    self.drag_start = None;
                    if tool != DrawTool::Polygon {
                        self.polygon_draft.clear();
                    }
                }
            }

            if self.tool == DrawTool::Polygon && self.polygon_draft.len() >= 3 {
                if ui.button("Finish area").clicked() {
                    let shape = DrawnShape::Polygon(std::mem::take(&mut self.polygon_draft));
                    session.set_region(&shape);
                }
            }

            ui.separator();
            if session.region().is_active() && ui.button("Clear area").clicked() {
                session.clear_region();
            }

            let mut show_heat = self.show_heat;
            if ui.checkbox(&mut show_heat, "Hotspots").changed() {
                self.show_heat = show_heat;
                session.set_heat_paused(!show_heat);
            }
        });
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        rect: Rect,
        response: &egui::Response,
        session: &mut DashboardSession,
    ) -> Option<MapAction> {
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                let center = session.viewport.center;
                let zoom = session.viewport.zoom + scroll as f64 * SCROLL_ZOOM_FACTOR;
                session.viewport.set_view(center, zoom);
            }
        }

        let pointer = response
            .interact_pointer_pos()
            .map(|p| self.unproject(p, rect, session));

        match self.tool {
            DrawTool::Pan => {
                if response.dragged() {
                    let delta = response.drag_delta();
                    let size = session.viewport.size;
                    let shifted = Point::new(
                        size.x / 2.0 - delta.x as f64,
                        size.y / 2.0 - delta.y as f64,
                    );
                    let center = session.viewport.from_screen(shifted);
                    session.viewport.pan_to(center);
                }
            }
            DrawTool::Rectangle | DrawTool::Circle => {
                if response.drag_started() {
                    self.drag_start = pointer;
                }
                if response.drag_released() {
                    if let (Some(start), Some(end)) = (self.drag_start.take(), pointer) {
                        return Some(MapAction::SetRegion(self.drag_shape(start, end)));
                    }
                }
            }
            DrawTool::Polygon => {
                if response.clicked() {
                    if let Some(vertex) = pointer {
                        self.polygon_draft.push(vertex);
                    }
                }
            }
        }

        None
    }

    /// Completed drag shape: a rectangle from the corner pair, or a circle
    /// from the center and the dragged-out radius.
    fn drag_shape(&self, start: LatLng, end: LatLng) -> DrawnShape {
        match self.tool {
            DrawTool::Circle => DrawnShape::Circle {
                center: start,
                radius: start.distance_to(&end),
            },
            _ => DrawnShape::Rectangle(LatLngBounds::from_coords(
                start.lat.min(end.lat),
                start.lng.min(end.lng),
                start.lat.max(end.lat),
                start.lng.max(end.lng),
            )),
        }
    }

    fn project(&self, coord: &LatLng, rect: Rect, session: &DashboardSession) -> Pos2 {
        let screen = session.viewport.to_screen(coord);
        rect.min + Vec2::new(screen.x as f32, screen.y as f32)
    }

    fn unproject(&self, pos: Pos2, rect: Rect, session: &DashboardSession) -> LatLng {
        let local = pos - rect.min;
        session
            .viewport
            .from_screen(Point::new(local.x as f64, local.y as f64))
    }

    fn paint_heat(&self, painter: &egui::Painter, rect: Rect, session: &DashboardSession) {
        let radius = session.views.heat.config().radius as f32;
        for sample in session.views.heat.samples() {
            let pos = self.project(&sample.position, rect, session);
            if !rect.expand(radius).contains(pos) {
                continue;
            }
            let alpha = (40.0 + sample.weight * 60.0) as u8;
            painter.circle_filled(
                pos,
                radius,
                Color32::from_rgba_unmultiplied(0xff, 0x45, 0x00, alpha),
            );
        }
    }

    fn paint_region(&self, painter: &egui::Painter, rect: Rect, session: &DashboardSession) {
        let Some(region) = session.region().region() else {
            return;
        };
        let stroke = Stroke::new(2.0, Color32::from_rgb(0x2c, 0x3e, 0x50));

        match region.shape() {
            DrawnShape::Rectangle(bounds) => {
                let sw = self.project(&bounds.south_west, rect, session);
                let ne = self.project(&bounds.north_east, rect, session);
                painter.rect_stroke(Rect::from_two_pos(sw, ne), 0.0, stroke);
            }
            DrawnShape::Circle { center, radius } => {
                let c = self.project(center, rect, session);
                let edge = self.project(&center.destination(90.0, *radius), rect, session);
                painter.circle_stroke(c, (edge - c).length(), stroke);
            }
            DrawnShape::Polygon(vertices) => {
                let points: Vec<Pos2> = vertices
                    .iter()
                    .map(|v| self.project(v, rect, session))
                    .collect();
                painter.add(egui::Shape::closed_line(points, stroke));
            }
        }
    }

    /// Paints singles as palette dots and groups as count bubbles.
    /// Returns a deferred action when a marker or bubble was clicked.
    fn paint_markers(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        response: &egui::Response,
        session: &DashboardSession,
    ) -> Option<MapAction> {
        let click = (self.tool == DrawTool::Pan && response.clicked())
            .then(|| response.interact_pointer_pos())
            .flatten();
        let mut action = None;

        for bubble in session.views.markers.clusters(session.viewport.zoom) {
            let pos = self.project(&bubble.center, rect, session);
            if !rect.expand(bubble.size_px as f32).contains(pos) {
                continue;
            }

            if bubble.is_single() {
                let marker = bubble
                    .fids
                    .first()
                    .and_then(|fid| session.views.markers.marker(fid));
                let Some(marker) = marker else { continue };

                painter.circle(
                    pos,
                    MARKER_RADIUS,
                    color32(marker.color),
                    Stroke::new(1.0, Color32::WHITE),
                );
                if let Some(click_pos) = click {
                    if (click_pos - pos).length() <= MARKER_HIT_RADIUS {
                        action = Some(MapAction::SelectMarker(marker.fid.clone()));
                    }
                }
            } else {
                let radius = bubble.size_px as f32 / 2.0;
                painter.circle(
                    pos,
                    radius,
                    Color32::from_rgba_unmultiplied(0x34, 0x98, 0xdb, 200),
                    Stroke::new(2.0, Color32::WHITE),
                );
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    bubble.count.to_string(),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
                if let Some(click_pos) = click {
                    if (click_pos - pos).length() <= radius {
                        action = Some(MapAction::ZoomToCluster(bubble.center));
                    }
                }
            }
        }

        action
    }

    fn paint_draft(&self, painter: &egui::Painter, rect: Rect, session: &DashboardSession) {
        if self.polygon_draft.is_empty() {
            return;
        }
        let points: Vec<Pos2> = self
            .polygon_draft
            .iter()
            .map(|v| self.project(v, rect, session))
            .collect();
        for p in &points {
            painter.circle_filled(*p, 3.0, Color32::from_rgb(0x2c, 0x3e, 0x50));
        }
        if points.len() > 1 {
            painter.add(egui::Shape::line(
                points,
                Stroke::new(1.5, Color32::from_rgb(0x2c, 0x3e, 0x50)),
            ));
        }
    }

    fn paint_popup(&mut self, ctx: &egui::Context, rect: Rect, session: &DashboardSession) {
        let Some(fid) = self.selected.clone() else {
            return;
        };
        // A filter change can drop the selected marker; close silently
        let Some(marker) = session.views.markers.marker(&fid) else {
            self.selected = None;
            return;
        };

        let anchor = self.project(&marker.position, rect, session);
        let mut open = true;
        egui::Window::new("Event")
            .id(egui::Id::new("marker_popup"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_pos(anchor + Vec2::new(12.0, -12.0))
            .show(ctx, |ui| {
                for line in marker.popup.lines() {
                    ui.label(line);
                }
            });
        if !open {
            self.selected = None;
        }
    }
}

impl Default for MapPanel {
    fn default() -> Self {
        Self::new()
    }
}
