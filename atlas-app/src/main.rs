use anyhow::Context;
use crisis_atlas::{ui::DashboardApp, EventCollection};

/// Standalone dashboard viewer: loads a GeoJSON event collection and
/// opens the interactive dashboard on it.
fn main() -> anyhow::Result<()> {
    crisis_atlas::init_logging();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "events.geojson".to_string());

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read event data from {path}"))?;
    let events = EventCollection::from_json_str(&raw)
        .with_context(|| format!("failed to parse {path} as a GeoJSON feature collection"))?;
    log::info!("loaded {} events from {path}", events.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Crisis Atlas"),
        ..Default::default()
    };

    eframe::run_native(
        "atlas-app",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, events)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the dashboard window: {e}"))?;

    Ok(())
}
