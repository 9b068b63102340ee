//! egui renderer for the application UI.

use crate::egui_app::controller::EguiController;
use eframe::egui;

mod api_key_modal;
mod chrome;
mod helpers;
mod items_panel;
mod layout;
mod overlay_layers;
pub mod style;
mod subjects_panel;
mod suggestions_modal;

/// Smallest window the two-panel layout stays usable at.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(880.0, 560.0);

/// Renders the egui UI on top of the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading persisted configuration and kicking off
    /// the initial class fetch.
    pub fn new() -> Result<Self, String> {
        let mut controller = EguiController::new()?;
        controller.startup();
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_panels(ctx);
        self.render_overlays(ctx);
        // Keep polling while workers run; idle frames wait for input.
        if self.controller.has_background_work() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
