//! Application theme and color definitions.
//!
//! Dark palette with monospace text styles throughout.

use eframe::egui::{
    self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals,
};

/// Color palette for the application.
pub mod palette {
    use eframe::egui::Color32;

    pub const BG_PANEL: Color32 = Color32::from_rgb(0x20, 0x22, 0x24);
    pub const BG_INPUT: Color32 = Color32::from_rgb(0x2b, 0x2d, 0x30);
    pub const BORDER: Color32 = Color32::from_rgb(0x3a, 0x3d, 0x41);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x8a, 0x8a, 0x8a);

    pub const ACCENT: Color32 = Color32::from_rgb(0x4a, 0x9e, 0xff);
    pub const ACCENT_OK: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
}

/// Configure egui style for the application.
pub fn configure_style(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = palette::BG_PANEL;
    visuals.panel_fill = palette::BG_PANEL;
    visuals.extreme_bg_color = palette::BG_INPUT;

    visuals.widgets.noninteractive.bg_fill = palette::BG_INPUT;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette::TEXT_MUTED);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette::BORDER);

    visuals.widgets.inactive.bg_fill = palette::BG_INPUT;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette::TEXT_PRIMARY);

    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette::ACCENT);
    visuals.widgets.active.bg_fill = palette::ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = palette::ACCENT.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, palette::ACCENT);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Heading, FontId::new(14.0, FontFamily::Monospace)),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
    ]
    .into();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    ctx.set_style(style);
}

/// Style a button as the primary action button.
pub fn primary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(palette::ACCENT_OK)
        .rounding(Rounding::same(4.0))
}

/// Create a form label.
pub fn form_label(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(10.0)
}

/// Create a stat label (left column).
pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).weak()
}

/// Create a stat value (right column).
pub fn stat_value(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0)
}
