// bzexclude - ui/panels/rule_list.rs
//
// Scrollable list of exclusion rules. Clicking a row selects it; the
// selected row is highlighted green.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the rule list (central panel).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if !state.warnings.is_empty() {
        for w in &state.warnings {
            ui.colored_label(theme::WARNING_TEXT, format!("\u{26a0} {w}"));
        }
        ui.separator();
    }

    if state.entries.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No exclusions for this platform. Use Select File or Select Folder to add one.");
        });
        return;
    }

    let mut clicked: Option<usize> = None;

    egui::ScrollArea::vertical()
        .id_salt("rule_list")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = theme::ROW_SPACING;
            for (idx, entry) in state.entries.iter().enumerate() {
                let is_selected = state.selected_index == Some(idx);
                let (fill, text_colour) = if is_selected {
                    (theme::SELECTED_BG, theme::SELECTED_TEXT)
                } else {
                    (egui::Color32::TRANSPARENT, ui.style().visuals.text_color())
                };

                let response = egui::Frame::new()
                    .fill(fill)
                    .corner_radius(theme::ROW_ROUNDING)
                    .inner_margin(egui::Margin::same(theme::ROW_PADDING))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(entry.label()).color(text_colour),
                            )
                            .selectable(false)
                            .sense(egui::Sense::click()),
                        )
                    });

                let row = response
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                if row.clicked() || response.inner.clicked() {
                    clicked = Some(idx);
                }
            }
        });

    if let Some(idx) = clicked {
        state.select(idx);
    }
}
