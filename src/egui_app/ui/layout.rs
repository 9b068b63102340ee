use super::EguiApp;
use super::style;
use eframe::egui;

impl EguiApp {
    pub(super) fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    pub(super) fn render_panels(&mut self, ctx: &egui::Context) {
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::SidePanel::left("subjects_panel")
            .resizable(true)
            .default_width(260.0)
            .min_width(220.0)
            .max_width(420.0)
            .show(ctx, |ui| self.render_subjects_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_items_panel(ui);
        });
    }

    pub(super) fn render_overlays(&mut self, ctx: &egui::Context) {
        self.render_suggestions_modal(ctx);
        self.render_api_key_modal(ctx);
    }
}
