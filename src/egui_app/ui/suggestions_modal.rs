use super::EguiApp;
use super::overlay_layers::{self, OverlayLayer};
use super::style;
use eframe::egui::{self, Align2, RichText, Ui};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SuggestionsAction {
    None,
    Commit,
    Cancel,
}

impl EguiApp {
    pub(super) fn render_suggestions_modal(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.suggestions.open {
            return;
        }
        overlay_layers::modal_backdrop(ctx, egui::Id::new("suggestions_backdrop"));
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.cancel_suggestions();
            return;
        }
        let mut open = true;
        let mut action = SuggestionsAction::None;
        egui::Window::new("AI Suggestions")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .default_width(560.0)
            .open(&mut open)
            .show(ctx, |ui| {
                action = self.render_suggestions_body(ui);
            });
        if !open || action == SuggestionsAction::Cancel {
            self.controller.cancel_suggestions();
            return;
        }
        if action == SuggestionsAction::Commit {
            self.controller.commit_selected_suggestions();
        }
    }

    fn render_suggestions_body(&mut self, ui: &mut Ui) -> SuggestionsAction {
        let palette = style::palette();
        let mut action = SuggestionsAction::None;
        ui.set_min_width(560.0);
        ui.label(
            RichText::new(format!(
                "Based on {} Year {}",
                self.controller.ui.suggestions.subject_label,
                self.controller.ui.suggestions.year_label
            ))
            .color(palette.text_muted),
        );
        ui.add_space(8.0);
        let rows = self.controller.ui.suggestions.rows.clone();
        egui::ScrollArea::vertical()
            .id_salt("suggestion_rows")
            .max_height(360.0)
            .show(ui, |ui| {
                for (index, row) in rows.iter().enumerate() {
                    ui.push_id(index, |ui| {
                        ui.horizontal(|ui| {
                            let mut selected = row.selected;
                            if ui.checkbox(&mut selected, "").clicked() {
                                self.controller.toggle_suggestion(index);
                            }
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(row.sk.as_str())
                                        .strong()
                                        .color(palette.text_primary),
                                );
                                ui.label(RichText::new(row.sp.as_str()).color(palette.text_muted));
                            });
                        });
                        ui.add_space(4.0);
                    });
                }
            });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                action = SuggestionsAction::Cancel;
            }
            let selected = self.controller.ui.suggestions.selected_count();
            let committing = self.controller.ui.suggestions.committing;
            let commit_label = format!("Add Selected ({selected})");
            if ui
                .add_enabled(selected > 0 && !committing, egui::Button::new(commit_label))
                .clicked()
            {
                action = SuggestionsAction::Commit;
            }
            if committing {
                ui.label(RichText::new("Adding…").color(palette.text_muted));
            }
        });
        action
    }
}
