// bzexclude - ui/panels/dialogs.rs
//
// Modal-ish windows: removal confirmation and info/error notices.

use crate::app::state::{AppState, NoticeKind};
use crate::ui::theme;

/// Render the "Are you sure?" window while a removal is pending.
pub fn render_confirm(ctx: &egui::Context, state: &mut AppState) {
    let Some(entry) = state.pending_removal.as_ref() else {
        return;
    };
    let label = entry.label();

    let mut answer: Option<bool> = None;
    egui::Window::new("Confirm")
        .collapsible(false)
        .resizable(false)
        .min_width(theme::DIALOG_MIN_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Are you sure you want to remove this item?");
            ui.add_space(4.0);
            ui.label(egui::RichText::new(label).monospace().weak());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });

    match answer {
        Some(true) => state.confirm_remove(),
        Some(false) => state.cancel_remove(),
        None => {}
    }
}

/// Render the current info/error notice, if any.
pub fn render_notice(ctx: &egui::Context, state: &mut AppState) {
    let Some(notice) = state.notice.as_ref() else {
        return;
    };

    let mut open = true;
    let mut dismissed = false;
    egui::Window::new(notice.title.as_str())
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(theme::DIALOG_MIN_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            match notice.kind {
                NoticeKind::Error => {
                    ui.colored_label(theme::ERROR_TEXT, &notice.text);
                }
                NoticeKind::Info => {
                    ui.label(&notice.text);
                }
            }
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if !open || dismissed {
        state.notice = None;
    }
}
