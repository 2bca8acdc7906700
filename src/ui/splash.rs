use egui::{Align2, Color32, Id, Vec2};

/// Storage key for the "don't show this again" choice
const STORAGE_KEY: &str = "splash_hide";

/// First-run overlay explaining the dashboard. Dismissed with a button;
/// the opt-out checkbox is persisted through the frontend's key-value
/// storage so it survives restarts.
pub struct SplashScreen {
    visible: bool,
    dont_show_again: bool,
}

impl SplashScreen {
    /// Restores the opt-out choice from storage; shown unless the user
    /// previously opted out.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        let hidden = storage
            .and_then(|s| s.get_string(STORAGE_KEY))
            .map(|v| v == "true")
            .unwrap_or(false);
        Self {
            visible: !hidden,
            dont_show_again: hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Re-opens the overlay (help menu entry)
    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn persist(&self, storage: &mut dyn eframe::Storage) {
        storage.set_string(STORAGE_KEY, self.dont_show_again.to_string());
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.visible {
            return;
        }

        // Dim the dashboard behind the overlay
        let screen = ctx.screen_rect();
        egui::Area::new(Id::new("splash_backdrop"))
            .fixed_pos(screen.min)
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(160));
            });

        egui::Window::new("Crisis Atlas")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.label("Explore geocoded conflict events on the map and in the linked charts.");
                ui.label("Filter by event type, disorder type or year, or draw a shape on the map to focus on an area. Every panel updates together.");
                ui.add_space(8.0);
                ui.checkbox(&mut self.dont_show_again, "Don't show this again");
                ui.add_space(4.0);
                if ui.button("Get started").clicked() {
                    self.visible = false;
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_without_storage() {
        let splash = SplashScreen::from_storage(None);
        assert!(splash.is_visible());
    }

    #[test]
    fn test_reopen_after_dismiss() {
        let mut splash = SplashScreen::from_storage(None);
        splash.visible = false;
        splash.open();
        assert!(splash.is_visible());
    }
}
