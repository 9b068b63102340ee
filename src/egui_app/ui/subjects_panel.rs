use super::EguiApp;
use super::helpers::{clamp_label_for_width, list_row_height, render_list_row};
use super::style;
use eframe::egui::{self, RichText, Ui};

impl EguiApp {
    pub(super) fn render_subjects_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Subjects")
                    .strong()
                    .color(palette.text_primary),
            );
            if self.controller.ui.subjects.loading {
                ui.label(RichText::new("Loading…").color(palette.text_muted));
            }
        });
        ui.add_space(6.0);
        if self.controller.ui.classes.selected.is_none() {
            ui.label(
                RichText::new("Select a class to list its subjects.").color(palette.text_muted),
            );
            return;
        }
        self.render_subject_add_row(ui);
        ui.add_space(6.0);
        let rows = self.controller.ui.subjects.rows.clone();
        if rows.is_empty() {
            if !self.controller.ui.subjects.loading {
                ui.label(RichText::new("No subjects added yet.").color(palette.text_muted));
            }
            return;
        }
        egui::ScrollArea::vertical()
            .id_salt("subjects_scroll")
            .show(ui, |ui| {
                let row_height = list_row_height(ui);
                for row in &rows {
                    ui.push_id(row.id.as_str(), |ui| {
                        let row_width = ui.available_width();
                        let padding = ui.spacing().button_padding.x * 2.0;
                        let label = clamp_label_for_width(&row.name, row_width - padding);
                        let bg = row.selected.then_some(style::row_selected_fill());
                        let response = render_list_row(
                            ui,
                            super::helpers::ListRow {
                                label: &label,
                                row_width,
                                row_height,
                                bg,
                                text_color: palette.text_primary,
                                sense: egui::Sense::click(),
                            },
                        );
                        if response.clicked() {
                            self.controller.select_subject(Some(row.id.clone()));
                        }
                    });
                }
            });
    }

    fn render_subject_add_row(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let adding = self.controller.ui.subjects.adding;
        let mut submit = false;
        ui.horizontal(|ui| {
            let response = ui.add_enabled(
                !adding,
                egui::TextEdit::singleline(&mut self.controller.ui.subjects.name_input)
                    .hint_text("Subject Name (e.g. BM, English)")
                    .desired_width(ui.available_width() - 56.0),
            );
            let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if enter_pressed && (response.has_focus() || response.lost_focus()) {
                submit = true;
            }
            let name_empty = self.controller.ui.subjects.name_input.trim().is_empty();
            if ui
                .add_enabled(!adding && !name_empty, egui::Button::new("Add"))
                .clicked()
            {
                submit = true;
            }
        });
        if adding {
            ui.label(RichText::new("Adding…").color(palette.text_muted));
        }
        if submit {
            self.controller.add_subject();
        }
    }
}
