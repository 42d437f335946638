// bzexclude - ui/panels/toolbar.rs
//
// Button row along the top of the window: add file, add folder, remove,
// backup, reload, about.

use crate::app::state::AppState;
use crate::core::model::PathKind;

/// Render the toolbar.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui
            .button("Select File")
            .on_hover_text("Exclude a single file")
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new().pick_file() {
                state.add_path(&path, PathKind::File);
            }
        }

        if ui
            .button("Select Folder")
            .on_hover_text("Exclude a folder and everything in it")
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new().pick_folder() {
                state.add_path(&path, PathKind::Folder);
            }
        }

        if ui.button("Remove Selected").clicked() {
            state.request_remove();
        }

        if ui
            .button("Backup This List")
            .on_hover_text("Copy the rules file to a timestamped backup")
            .clicked()
        {
            state.backup();
        }

        ui.separator();

        if ui
            .button("\u{27f3} Reload")
            .on_hover_text("Re-read the rules file from disk")
            .clicked()
        {
            state.reload();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{24d8}").on_hover_text("About").clicked() {
                state.show_about = true;
            }
        });
    });
}
