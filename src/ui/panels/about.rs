// bzexclude - ui/panels/about.rs
//
// About dialog: shown when the user clicks the ⓘ button in the toolbar.
// Rendered as a centred, non-resizable, non-collapsible modal window.

use crate::app::state::AppState;
use crate::util::constants::{APP_NAME, APP_VERSION};

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let rules_path = state.editor.path().display().to_string();
    let platform = state.editor.platform();

    let mut open = true;
    egui::Window::new("About")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(APP_NAME).size(22.0).strong());
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("v{APP_VERSION}")).size(14.0).weak());
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label("View, add, and remove file and folder exclusions");
                ui.label("in the Backblaze exclusion rules file.");
            });

            ui.add_space(10.0);

            egui::Grid::new("about_grid")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Rules file:");
                    ui.label(egui::RichText::new(rules_path).monospace());
                    ui.end_row();

                    ui.label("Platform:");
                    ui.label(platform.label());
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(6.0);

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("MIT License").small().weak());
                ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
            });

            ui.add_space(8.0);
        });

    if !open {
        state.show_about = false;
    }
}
