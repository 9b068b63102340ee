use super::EguiApp;
use super::helpers::{NumberColumn, clamp_label_for_width, list_row_height, number_column_width};
use super::style;
use crate::egui_app::state::ItemRowView;
use eframe::egui::{self, Align2, RichText, TextStyle, Ui};

impl EguiApp {
    pub(super) fn render_items_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let Some(subject_label) = self.controller.ui.items.subject_label.clone() else {
            render_no_subject_placeholder(ui);
            return;
        };
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(format!("{subject_label} DSKP"))
                        .strong()
                        .color(palette.text_primary),
                );
                ui.label(
                    RichText::new("Standard Kandungan & Pembelajaran").color(palette.text_muted),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.render_item_actions(ui);
            });
        });
        ui.add_space(8.0);
        self.render_items_list(ui);
    }

    fn render_item_actions(&mut self, ui: &mut Ui) {
        let importing = self.controller.ui.items.importing;
        let requesting = self.controller.ui.suggestions.requesting;
        let busy = importing || requesting;
        let import_label = if importing {
            "Parsing DSKP…"
        } else {
            "Import DSKP (PDF)"
        };
        if ui
            .add_enabled(!busy, egui::Button::new(import_label))
            .clicked()
        {
            self.controller.begin_import_document();
        }
        let suggest_label = if requesting {
            "Thinking…"
        } else {
            "Suggest with AI"
        };
        if ui
            .add_enabled(!busy, egui::Button::new(suggest_label))
            .clicked()
        {
            self.controller.request_suggestions();
        }
    }

    fn render_items_list(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let rows = self.controller.ui.items.rows.clone();
        let loading = self.controller.ui.items.loading;
        style::section_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new("DSKP Structure").color(palette.text_muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{} Items", rows.len())).color(palette.text_muted),
                    );
                });
            });
            ui.add_space(4.0);
            if loading {
                ui.label(RichText::new("Loading DSKP items…").color(palette.text_muted));
                return;
            }
            if rows.is_empty() {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("No DSKP items found for this subject.")
                            .color(palette.text_muted),
                    );
                    ui.label(
                        RichText::new("Upload a PDF to auto-extract SK/SP items.")
                            .color(palette.text_muted),
                    );
                });
                ui.add_space(24.0);
                return;
            }
            let number_width = number_column_width(rows.len(), ui);
            egui::ScrollArea::vertical()
                .id_salt("dskp_items_scroll")
                .show(ui, |ui| {
                    for (index, row) in rows.iter().enumerate() {
                        let number_text = format!("{}", index + 1);
                        ui.push_id(row.id.as_str(), |ui| {
                            render_item_row(
                                ui,
                                row,
                                NumberColumn {
                                    text: &number_text,
                                    width: number_width,
                                    color: palette.text_muted,
                                },
                            );
                        });
                    }
                });
        });
    }
}

fn render_no_subject_placeholder(ui: &mut Ui) {
    let palette = style::palette();
    ui.add_space(ui.available_height() * 0.3);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Select a Subject")
                .strong()
                .color(palette.text_primary),
        );
        ui.label(
            RichText::new("Choose a subject from the left panel to manage its DSKP standards.")
                .color(palette.text_muted),
        );
    });
}

/// Two-line row: content standard on top, learning standard below it.
fn render_item_row(ui: &mut Ui, row: &ItemRowView, number: NumberColumn<'_>) {
    let palette = style::palette();
    let row_height = list_row_height(ui) * 2.0;
    let row_width = ui.available_width();
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(row_width, row_height), egui::Sense::hover());
    if response.hovered() {
        ui.painter().rect_filled(rect, 0.0, style::row_hover_fill());
    }
    ui.painter().line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        style::inner_border(),
    );
    let font_id = TextStyle::Button.resolve(ui.style());
    let padding = ui.spacing().button_padding.x;
    ui.painter().text(
        egui::pos2(rect.left() + padding, rect.center().y),
        Align2::LEFT_CENTER,
        number.text,
        font_id.clone(),
        number.color,
    );
    let label_x = rect.left() + padding + number.width + padding * 0.5;
    let label_width = rect.right() - label_x - padding;
    ui.painter().text(
        egui::pos2(label_x, rect.top() + row_height * 0.28),
        Align2::LEFT_CENTER,
        clamp_label_for_width(&row.sk, label_width),
        font_id.clone(),
        palette.accent_mint,
    );
    ui.painter().text(
        egui::pos2(label_x, rect.top() + row_height * 0.72),
        Align2::LEFT_CENTER,
        clamp_label_for_width(&row.sp, label_width),
        font_id,
        palette.text_muted,
    );
    response.on_hover_text(format!("SK: {}\nSP: {}", row.sk, row.sp));
}
