use super::EguiApp;
use super::style;
use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

impl EguiApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Silibus")
                            .strong()
                            .color(palette.text_primary),
                    );
                    ui.add_space(10.0);
                    ui.separator();
                    self.render_class_picker(ui);
                    let loading = self.controller.ui.classes.loading;
                    if ui
                        .add_enabled(!loading, egui::Button::new("Refresh"))
                        .clicked()
                    {
                        self.controller.begin_classes_load();
                    }
                    if loading {
                        ui.label(RichText::new("Loading classes…").color(palette.text_muted));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        const APP_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
                        ui.label(RichText::new(APP_VERSION).color(palette.text_muted));
                        ui.add_space(10.0);
                        if ui.button("API key…").clicked() {
                            self.controller.open_api_key_modal();
                        }
                    });
                });
            });
    }

    fn render_class_picker(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let rows = self.controller.ui.classes.rows.clone();
        let selected = self.controller.ui.classes.selected.clone();
        let current = self
            .controller
            .ui
            .classes
            .selected_label()
            .unwrap_or("Select a class")
            .to_string();
        egui::ComboBox::from_id_salt("class_picker")
            .width(220.0)
            .selected_text(current)
            .show_ui(ui, |ui| {
                for row in &rows {
                    let is_selected = selected.as_ref() == Some(&row.id);
                    if ui.selectable_label(is_selected, &row.label).clicked() {
                        self.controller.select_class(Some(row.id.clone()));
                    }
                }
                if rows.is_empty() {
                    ui.label(RichText::new("No classes yet").color(palette.text_muted));
                }
            });
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::inner_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }
}
