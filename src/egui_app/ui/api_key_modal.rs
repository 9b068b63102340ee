use super::EguiApp;
use super::overlay_layers::{self, OverlayLayer};
use super::style;
use eframe::egui::{self, Align2, RichText, Ui};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ApiKeyAction {
    None,
    Save,
    Remove,
    Cancel,
}

impl EguiApp {
    pub(super) fn render_api_key_modal(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.api_key.open {
            return;
        }
        overlay_layers::modal_backdrop(ctx, egui::Id::new("api_key_backdrop"));
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.close_api_key_modal();
            return;
        }
        let mut open = true;
        let mut action = ApiKeyAction::None;
        egui::Window::new("Gemini API Key")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .default_width(520.0)
            .open(&mut open)
            .show(ctx, |ui| {
                action = self.render_api_key_body(ui);
            });
        if !open || action == ApiKeyAction::Cancel {
            self.controller.close_api_key_modal();
            return;
        }
        match action {
            ApiKeyAction::Save => self.controller.save_api_key(),
            ApiKeyAction::Remove => self.controller.remove_api_key(),
            ApiKeyAction::None | ApiKeyAction::Cancel => {}
        }
    }

    fn render_api_key_body(&mut self, ui: &mut Ui) -> ApiKeyAction {
        let palette = style::palette();
        let mut action = ApiKeyAction::None;
        ui.set_min_width(520.0);
        ui.label(
            RichText::new("AI extraction and suggestions call the Gemini API with this key.")
                .color(palette.text_muted),
        );
        if self.controller.ui.api_key.has_key {
            ui.label(
                RichText::new("A key is already stored; saving replaces it.")
                    .color(palette.text_muted),
            );
        }
        ui.add_space(6.0);
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.controller.ui.api_key.input)
                .hint_text("Paste Gemini API key")
                .password(true)
                .desired_width(480.0),
        );
        if self.controller.ui.api_key.focus_requested && !response.has_focus() {
            response.request_focus();
            self.controller.ui.api_key.focus_requested = false;
        }
        let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter_pressed && (response.has_focus() || response.lost_focus()) {
            action = ApiKeyAction::Save;
        }
        if let Some(error) = self.controller.ui.api_key.last_error.clone() {
            ui.add_space(4.0);
            ui.label(
                RichText::new(error).color(style::status_badge_color(style::StatusTone::Error)),
            );
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                action = ApiKeyAction::Cancel;
            }
            let can_save = !self.controller.ui.api_key.input.trim().is_empty();
            if ui
                .add_enabled(can_save, egui::Button::new("Save"))
                .clicked()
            {
                action = ApiKeyAction::Save;
            }
            if self.controller.ui.api_key.has_key
                && ui
                    .button(RichText::new("Remove").color(style::destructive_text()))
                    .clicked()
            {
                action = ApiKeyAction::Remove;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Get an API key").clicked() {
                    self.controller.open_api_key_page();
                }
            });
        });
        action
    }
}
