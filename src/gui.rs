// bzexclude - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the toolbar, the rule list, the status bar, and dialogs.

use crate::app::state::AppState;
use crate::ui;

/// The exclusion editor application.
pub struct ExclusionEditorApp {
    pub state: AppState,
}

impl ExclusionEditorApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ExclusionEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::toolbar::render(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} entries", self.state.entries.len()));
                    ui.separator();
                    ui.label(self.state.editor.platform().label());
                    ui.separator();
                    ui.label(
                        egui::RichText::new(self.state.editor.path().display().to_string())
                            .monospace()
                            .small(),
                    );
                    if self.state.debug_mode {
                        ui.separator();
                        ui.label(egui::RichText::new("DEBUG").small().weak());
                    }
                });
            });
        });

        // Central panel (rule list)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::rule_list::render(ui, &mut self.state);
        });

        // Dialogs. The notice goes last so an error raised by a confirmation
        // shows on top.
        ui::panels::dialogs::render_confirm(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
        ui::panels::dialogs::render_notice(ctx, &mut self.state);
    }
}
