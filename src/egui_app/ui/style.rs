use eframe::egui::{
    Color32, Frame, Margin, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_mint: Color32,
    pub accent_ice: Color32,
    pub warning: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(12, 12, 14),
        bg_secondary: Color32::from_rgb(24, 26, 29),
        bg_tertiary: Color32::from_rgb(40, 43, 47),
        panel_outline: Color32::from_rgb(40, 44, 50),
        grid_soft: Color32::from_rgb(30, 32, 36),
        text_primary: Color32::from_rgb(188, 194, 201),
        text_muted: Color32::from_rgb(138, 144, 153),
        accent_mint: Color32::from_rgb(132, 240, 204),
        accent_ice: Color32::from_rgb(160, 212, 252),
        warning: Color32::from_rgb(206, 138, 96),
        success: Color32::from_rgb(108, 180, 140),
    }
}

/// Tone attached to the status bar badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Success,
    Warning,
    Error,
}

pub fn status_badge_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Working",
        StatusTone::Info => "Info",
        StatusTone::Success => "Done",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Idle => palette.text_muted,
        StatusTone::Busy => palette.accent_mint,
        StatusTone::Info => palette.accent_ice,
        StatusTone::Success => palette.success,
        StatusTone::Warning => palette.warning,
        StatusTone::Error => destructive_text(),
    }
}

pub fn destructive_text() -> Color32 {
    Color32::from_rgb(224, 104, 104)
}

pub fn section_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub fn section_frame() -> Frame {
    Frame::new()
        .fill(palette().bg_secondary)
        .stroke(section_stroke())
        .inner_margin(Margin::same(6))
}

pub fn inner_border() -> Stroke {
    Stroke::new(1.0, palette().grid_soft)
}

pub fn row_hover_fill() -> Color32 {
    let palette = palette();
    Color32::from_rgb(
        (palette.bg_tertiary.r() as u16 + 6) as u8,
        (palette.bg_tertiary.g() as u16 + 6) as u8,
        (palette.bg_tertiary.b() as u16 + 6) as u8,
    )
}

pub fn row_selected_fill() -> Color32 {
    let palette = palette();
    Color32::from_rgb(
        (palette.bg_tertiary.r() as u16 + 18) as u8,
        (palette.bg_tertiary.g() as u16 + 14) as u8,
        (palette.bg_tertiary.b() as u16 + 10) as u8,
    )
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.grid_soft;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rectilinear(&mut visuals.widgets.inactive, palette);
    set_rectilinear(&mut visuals.widgets.hovered, palette);
    set_rectilinear(&mut visuals.widgets.active, palette);
    set_rectilinear(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}
