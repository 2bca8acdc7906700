//! egui dashboard on top of the filter-and-render pipeline.
//!
//! The pipeline stays UI-agnostic: these widgets read the view models the
//! renderers produced and feed user gestures back into the session as
//! state changes.

pub mod dashboard;
pub mod locate;
pub mod map_panel;
pub mod plots;
pub mod splash;

pub use dashboard::DashboardApp;

/// Parses a `#rrggbb` palette color into an egui color. Anything
/// unparsable renders as mid-gray rather than failing the frame.
pub(crate) fn color32(hex: &str) -> egui::Color32 {
    let parsed = hex.strip_prefix('#').and_then(|h| {
        if h.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&h[0..2], 16).ok()?;
        let g = u8::from_str_radix(&h[2..4], 16).ok()?;
        let b = u8::from_str_radix(&h[4..6], 16).ok()?;
        Some(egui::Color32::from_rgb(r, g, b))
    });
    parsed.unwrap_or(egui::Color32::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_color_parsing() {
        assert_eq!(color32("#f39c12"), egui::Color32::from_rgb(0xf3, 0x9c, 0x12));
        assert_eq!(color32("#000000"), egui::Color32::BLACK);
        assert_eq!(color32("not-a-color"), egui::Color32::GRAY);
        assert_eq!(color32("#f39"), egui::Color32::GRAY);
    }
}
