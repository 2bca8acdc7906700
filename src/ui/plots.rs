//! Chart widgets: each function draws one renderer's model. Clickable
//! charts return the label that was hit so the caller can route it into
//! the session as a filter toggle.

use crate::render::views::charts::{
    DisorderFlowChart, EventTypeDonut, FatalityChart, SubEventChart, TimelineChart,
    TopRegionChart, WeekdayRadar, YearMonthGrid,
};
use crate::ui::color32;
use egui::{Color32, Pos2, Sense, Stroke, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

const DONUT_SEGMENTS_PER_SLICE: usize = 48;

/// Event-type donut. Returns the clicked slice label, if any.
pub fn donut(ui: &mut egui::Ui, chart: &EventTypeDonut) -> Option<String> {
    let size = 180.0_f32;
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::click());
    let painter = ui.painter_at(rect);

    let total: u64 = chart.slices.iter().map(|s| s.count).sum();
    if total == 0 {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No events",
            egui::FontId::proportional(13.0),
            Color32::GRAY,
        );
        return None;
    }

    let center = rect.center();
    let outer = size * 0.45;
    let inner = size * 0.28;
    let click = response
        .clicked()
        .then(|| response.interact_pointer_pos())
        .flatten();
    let mut clicked_label = None;

    let mut angle = -std::f32::consts::FRAC_PI_2;
    for slice in &chart.slices {
        let sweep = (slice.count as f32 / total as f32) * std::f32::consts::TAU;
        let color = color32(slice.color);

        painter.add(egui::Shape::mesh(ring_segment_mesh(
            center,
            inner,
            outer,
            angle,
            sweep,
            DONUT_SEGMENTS_PER_SLICE,
            color,
        )));
        // Separator between slices
        painter.line_segment(
            [
                center + Vec2::angled(angle) * inner,
                center + Vec2::angled(angle) * outer,
            ],
            Stroke::new(1.0, Color32::WHITE),
        );

        if let Some(pos) = click {
            if slice_hit(pos, center, inner, outer, angle, sweep) {
                clicked_label = Some(slice.label.clone());
            }
        }
        angle += sweep;
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        format!("{total}"),
        egui::FontId::proportional(18.0),
        ui.visuals().text_color(),
    );

    clicked_label
}

fn slice_hit(pos: Pos2, center: Pos2, inner: f32, outer: f32, start: f32, sweep: f32) -> bool {
    let offset = pos - center;
    let dist = offset.length();
    if dist < inner || dist > outer {
        return false;
    }
    let angle = offset.y.atan2(offset.x);
    let mut rel = angle - start;
    while rel < 0.0 {
        rel += std::f32::consts::TAU;
    }
    rel < sweep
}

/// Annular ring segment as a triangle strip between the inner and outer
/// arcs. An annulus segment is not convex, so it cannot go through the
/// convex-polygon shape without tessellation artifacts.
fn ring_segment_mesh(
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    sweep: f32,
    steps: usize,
    color: Color32,
) -> egui::Mesh {
    let steps = steps.max(2);
    let mut mesh = egui::Mesh::default();
    for i in 0..=steps {
        let dir = Vec2::angled(start + sweep * (i as f32 / steps as f32));
        mesh.colored_vertex(center + dir * outer, color);
        mesh.colored_vertex(center + dir * inner, color);
    }
    for i in 0..steps as u32 {
        let base = i * 2;
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 2, base + 1, base + 3);
    }
    mesh
}

/// Star-shaped polygon fill as a fan of triangles from the center; the
/// radar polygon is concave whenever adjacent counts differ enough.
fn fan_mesh(center: Pos2, points: &[Pos2], color: Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, color);
    for p in points {
        mesh.colored_vertex(*p, color);
    }
    let n = points.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

/// Events-per-year line
pub fn timeline(ui: &mut egui::Ui, chart: &TimelineChart) {
    let points: PlotPoints = chart
        .points
        .iter()
        .map(|&(year, count)| [year as f64, count as f64])
        .collect();

    Plot::new("timeline")
        .height(140.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::from_rgb(0x34, 0x98, 0xdb)));
        });
}

/// Horizontal ranked bars shared by the sub-event and top-region charts.
/// Returns the clicked bar label, if any.
fn ranked_bars(ui: &mut egui::Ui, id: &str, bars: &[(String, u64)], color: Color32) -> Option<String> {
    let mut clicked = None;
    let max = bars.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1) as f32;

    ui.push_id(id, |ui| {
        for (label, count) in bars {
            let frac = *count as f32 / max;
            let (rect, response) = ui.allocate_exact_size(
                Vec2::new(ui.available_width(), 18.0),
                Sense::click(),
            );
            let painter = ui.painter_at(rect);
            let bar = egui::Rect::from_min_size(
                rect.min,
                Vec2::new(rect.width() * frac.max(0.01), rect.height() - 2.0),
            );
            painter.rect_filled(bar, 2.0, color.gamma_multiply(0.85));
            painter.text(
                rect.left_center() + Vec2::new(4.0, 0.0),
                egui::Align2::LEFT_CENTER,
                format!("{label} ({count})"),
                egui::FontId::proportional(12.0),
                ui.visuals().strong_text_color(),
            );
            if response.clicked() {
                clicked = Some(label.clone());
            }
        }
    });

    clicked
}

/// Sub-event bars, smallest buckets already grouped into "Others"
pub fn sub_events(ui: &mut egui::Ui, chart: &SubEventChart) -> Option<String> {
    ranked_bars(ui, "sub_events", &chart.bars, Color32::from_rgb(0x8e, 0x44, 0xad))
}

/// Top regions by event count
pub fn top_regions(ui: &mut egui::Ui, chart: &TopRegionChart) -> Option<String> {
    ranked_bars(ui, "top_regions", &chart.bars, Color32::from_rgb(0x16, 0xa0, 0x85))
}

/// Day-of-week radar polygon
pub fn weekday_radar(ui: &mut egui::Ui, chart: &WeekdayRadar) {
    let size = 170.0_f32;
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = size * 0.38;
    let max = chart.counts.iter().copied().max().unwrap_or(0).max(1) as f32;

    let axis_angle = |i: usize| {
        -std::f32::consts::FRAC_PI_2 + std::f32::consts::TAU * (i as f32 / 7.0)
    };

    // Spokes and labels
    for (i, label) in WeekdayRadar::LABELS.iter().enumerate() {
        let dir = Vec2::angled(axis_angle(i));
        painter.line_segment(
            [center, center + dir * radius],
            Stroke::new(0.5, Color32::from_gray(160)),
        );
        painter.text(
            center + dir * (radius + 12.0),
            egui::Align2::CENTER_CENTER,
            *label,
            egui::FontId::proportional(10.0),
            ui.visuals().text_color(),
        );
    }

    let points: Vec<Pos2> = chart
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| center + Vec2::angled(axis_angle(i)) * (radius * count as f32 / max))
        .collect();
    painter.add(egui::Shape::mesh(fan_mesh(
        center,
        &points,
        Color32::from_rgba_unmultiplied(0x34, 0x98, 0xdb, 90),
    )));
    painter.add(egui::Shape::closed_line(
        points,
        Stroke::new(1.5, Color32::from_rgb(0x34, 0x98, 0xdb)),
    ));
}

/// Disorder-to-event-type ribbons, drawn as a two-column band diagram
pub fn flows(ui: &mut egui::Ui, chart: &DisorderFlowChart) {
    let height = 160.0_f32;
    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);

    let total: u64 = chart.flows.iter().map(|f| f.count).sum();
    if total == 0 {
        return;
    }

    // Stack each side in flow order; band thickness is proportional to count
    let mut left_y = rect.top();
    let mut right_y = rect.top();
    for flow in &chart.flows {
        let thickness = rect.height() * (flow.count as f32 / total as f32);
        let from = Pos2::new(rect.left() + 4.0, left_y + thickness / 2.0);
        let to = Pos2::new(rect.right() - 4.0, right_y + thickness / 2.0);
        let color = crate::ui::color32(crate::render::style::type_style(Some(&flow.to)).fill);

        painter.line_segment(
            [from, to],
            Stroke::new(thickness.max(1.0), color.gamma_multiply(0.5)),
        );
        painter.text(
            from + Vec2::new(2.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &flow.from,
            egui::FontId::proportional(10.0),
            ui.visuals().text_color(),
        );
        painter.text(
            to - Vec2::new(2.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            &flow.to,
            egui::FontId::proportional(10.0),
            ui.visuals().text_color(),
        );

        left_y += thickness;
        right_y += thickness;
    }
}

/// Fatalities per event type as a plot-backed bar chart
pub fn fatalities(ui: &mut egui::Ui, chart: &FatalityChart) {
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, (label, total, color))| {
            Bar::new(i as f64, *total)
                .name(label.clone())
                .fill(color32(color))
        })
        .collect();

    Plot::new("fatalities")
        .height(140.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show_x(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Year-by-month activity matrix
pub fn calendar(ui: &mut egui::Ui, chart: &YearMonthGrid) {
    const MONTHS: [&str; 12] = [
        "J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D",
    ];

    if chart.years.is_empty() {
        ui.label("No dated events");
        return;
    }

    let cell = 16.0_f32;
    egui::Grid::new("calendar_grid").spacing([2.0, 2.0]).show(ui, |ui| {
        ui.label("");
        for m in MONTHS {
            ui.small(m);
        }
        ui.end_row();

        for &year in &chart.years {
            ui.small(year.to_string());
            for month in 0..12u32 {
                let count = chart
                    .cells
                    .iter()
                    .find(|c| c.year == year && c.month == month)
                    .map(|c| c.count)
                    .unwrap_or(0);
                let heat = count as f32 / chart.max_count as f32;
                let color = if count == 0 {
                    ui.visuals().faint_bg_color
                } else {
                    // Blue to red ramp matching the hotspot legend
                    Color32::from_rgb(
                        (0x4f as f32 + heat * (0xff - 0x4f) as f32) as u8,
                        (0xac as f32 * (1.0 - heat * 0.8)) as u8,
                        (0xfe as f32 * (1.0 - heat)) as u8,
                    )
                };
                let (rect, response) = ui.allocate_exact_size(Vec2::splat(cell), Sense::hover());
                ui.painter_at(rect).rect_filled(rect, 2.0, color);
                if count > 0 {
                    response.on_hover_text(format!("{year}-{:02}: {count}", month + 1));
                }
            }
            ui.end_row();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_segment_mesh_stays_on_the_annulus() {
        let steps = 8;
        let mesh = ring_segment_mesh(
            Pos2::ZERO,
            10.0,
            20.0,
            0.0,
            std::f32::consts::PI,
            steps,
            Color32::RED,
        );

        assert_eq!(mesh.vertices.len(), (steps + 1) * 2);
        assert_eq!(mesh.indices.len(), steps * 2 * 3);
        // Every vertex sits on the inner or outer arc
        for v in &mesh.vertices {
            let r = v.pos.to_vec2().length();
            assert!((r - 10.0).abs() < 1e-3 || (r - 20.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_fan_mesh_covers_every_edge() {
        // Strongly concave star shape
        let points: Vec<Pos2> = (0..7)
            .map(|i| {
                let r = if i % 2 == 0 { 40.0 } else { 5.0 };
                Pos2::ZERO + Vec2::angled(std::f32::consts::TAU * i as f32 / 7.0) * r
            })
            .collect();

        let mesh = fan_mesh(Pos2::ZERO, &points, Color32::BLUE);
        assert_eq!(mesh.vertices.len(), points.len() + 1);
        // One triangle per edge, wrapping back to the first vertex
        assert_eq!(mesh.indices.len(), points.len() * 3);
        let last = &mesh.indices[mesh.indices.len() - 3..];
        assert_eq!(last, &[0, points.len() as u32, 1]);
    }
}
