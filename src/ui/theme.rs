// bzexclude - ui/theme.rs
//
// Colour scheme and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Background of the selected row.
pub const SELECTED_BG: Color32 = Color32::from_rgb(22, 163, 74); // Green 600

/// Text on the selected row.
pub const SELECTED_TEXT: Color32 = Color32::WHITE;

/// Title colour of error notices.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Warning text (config problems).
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Layout constants.
pub const ROW_ROUNDING: u8 = 6;
pub const ROW_PADDING: i8 = 5;
pub const ROW_SPACING: f32 = 2.0;
pub const DIALOG_MIN_WIDTH: f32 = 360.0;

/// Apply the configured theme and font size to the egui context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    let mut style = (*ctx.style()).clone();
    for (text_style, font) in style.text_styles.iter_mut() {
        match text_style {
            egui::TextStyle::Body | egui::TextStyle::Button | egui::TextStyle::Monospace => {
                font.size = font_size;
            }
            egui::TextStyle::Heading => font.size = font_size * 1.4,
            egui::TextStyle::Small => font.size = font_size * 0.75,
            _ => {}
        }
    }
    ctx.set_style(style);
}
