use super::style;
use eframe::egui::{self, Align2, Color32, TextStyle, Ui};

/// Metadata for rendering a fixed-width number column alongside a list row.
pub(super) struct NumberColumn<'a> {
    pub text: &'a str,
    pub width: f32,
    pub color: Color32,
}

/// Estimate a width that comfortably fits numbering for the given row count.
pub(super) fn number_column_width(total_rows: usize, ui: &Ui) -> f32 {
    let digits = total_rows.max(1).to_string().len() as f32;
    let approx_char_width = 8.0;
    let padding = ui.spacing().button_padding.x;
    padding * 1.5 + digits * approx_char_width
}

pub(super) fn list_row_height(ui: &Ui) -> f32 {
    ui.spacing().interact_size.y
}

pub(super) fn clamp_label_for_width(text: &str, available_width: f32) -> String {
    // Rough character-based truncation to avoid layout thrash.
    let width = available_width.max(1.0);
    let approx_char_width = 8.0;
    let max_chars = (width / approx_char_width).floor().max(6.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut clipped = String::with_capacity(max_chars);
    for (i, ch) in text.chars().enumerate() {
        if i >= keep {
            clipped.push_str("...");
            break;
        }
        clipped.push(ch);
    }
    clipped
}

pub(super) struct ListRow<'a> {
    pub label: &'a str,
    pub row_width: f32,
    pub row_height: f32,
    pub bg: Option<Color32>,
    pub text_color: Color32,
    pub sense: egui::Sense,
}

pub(super) fn render_list_row(ui: &mut Ui, row: ListRow<'_>) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(row.row_width, row.row_height), row.sense);
    if let Some(color) = row.bg {
        ui.painter().rect_filled(rect, 0.0, color);
    }
    if response.hovered() {
        ui.painter().rect_filled(rect, 0.0, style::row_hover_fill());
    }
    // Single divider to avoid stacking strokes between rows.
    ui.painter().line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        style::inner_border(),
    );
    let font_id = TextStyle::Button.resolve(ui.style());
    let padding = ui.spacing().button_padding.x;
    let label_x = rect.left() + padding;
    ui.painter().text(
        egui::pos2(label_x, rect.center().y),
        Align2::LEFT_CENTER,
        row.label,
        font_id,
        row.text_color,
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_short_labels_intact() {
        assert_eq!(clamp_label_for_width("Sains", 400.0), "Sains");
    }

    #[test]
    fn clamp_appends_ellipsis_when_too_long() {
        let clipped = clamp_label_for_width(
            "1.1.1 Menyatakan kuantiti melalui perbandingan banyak atau sedikit",
            80.0,
        );
        assert!(clipped.ends_with("..."));
        assert!(clipped.chars().count() <= 10);
    }
}
