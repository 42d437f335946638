// bzexclude - app/state.rs
//
// Application state management. Holds the rules file handle, the displayed
// entries, the selection, and the pending dialogs.
// Owned by the eframe::App implementation.

use crate::app::exclusions::ExclusionFile;
use crate::core::model::{DisplayEntry, PathKind};
use std::path::Path;

/// Severity of a modal notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message box waiting to be dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn info(title: &str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            text: text.into(),
        }
    }

    pub fn error(title: &str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            text: text.into(),
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The rules file being edited.
    pub editor: ExclusionFile,

    /// Rules currently shown, in file order.
    pub entries: Vec<DisplayEntry>,

    /// Index into `entries` of the highlighted row.
    pub selected_index: Option<usize>,

    /// Entry awaiting the user's removal confirmation.
    pub pending_removal: Option<DisplayEntry>,

    /// Modal info/error message, if one is showing.
    pub notice: Option<Notice>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal configuration warnings gathered at startup.
    pub warnings: Vec<String>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create state for `editor` and load its entries.
    pub fn new(editor: ExclusionFile, debug_mode: bool) -> Self {
        let mut state = Self {
            editor,
            entries: Vec::new(),
            selected_index: None,
            pending_removal: None,
            notice: None,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            debug_mode,
        };
        state.reload();
        state
    }

    /// Re-read the rules file. Clears the selection.
    pub fn reload(&mut self) {
        self.selected_index = None;
        self.pending_removal = None;
        match self.editor.load() {
            Ok(entries) => {
                self.status_message = format!("{} exclusion(s) loaded.", entries.len());
                self.entries = entries;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load exclusion list");
                self.entries.clear();
                self.status_message = "Could not load the exclusion list.".to_string();
                self.notice = Some(Notice::error(
                    "Error",
                    format!("Error loading existing entries: {e}"),
                ));
            }
        }
    }

    /// Highlight row `index` (ignored when out of range).
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected_index = Some(index);
        }
    }

    /// The highlighted entry, if any.
    pub fn selected_entry(&self) -> Option<&DisplayEntry> {
        self.selected_index.and_then(|idx| self.entries.get(idx))
    }

    /// "Remove Selected": ask for confirmation, or tell the user to pick a
    /// row first.
    pub fn request_remove(&mut self) {
        match self.selected_entry().cloned() {
            Some(entry) => self.pending_removal = Some(entry),
            None => self.notice = Some(Notice::info("Info", "Please select an item first")),
        }
    }

    /// The user said yes: delete the pending entry from the file.
    pub fn confirm_remove(&mut self) {
        let Some(entry) = self.pending_removal.take() else {
            return;
        };
        match self.editor.remove(&entry.text) {
            Ok(_) => {
                self.reload();
                self.status_message = format!("Removed: {}", entry.text);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to remove exclusion");
                self.notice = Some(Notice::error("Error", format!("Error removing entry: {e}")));
            }
        }
    }

    /// The user said no.
    pub fn cancel_remove(&mut self) {
        self.pending_removal = None;
    }

    /// Add a rule for a file or folder chosen in a picker.
    pub fn add_path(&mut self, picked: &Path, kind: PathKind) {
        let Some(picked) = picked.to_str() else {
            self.notice = Some(Notice::error(
                "Error",
                format!("Path '{}' is not valid UTF-8", picked.display()),
            ));
            return;
        };
        match self.editor.add_path(picked, kind) {
            Ok(rule) => {
                self.reload();
                self.status_message = format!("Added: {}", rule.contains_1);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add exclusion");
                self.notice = Some(Notice::error("Error", format!("Error updating XML: {e}")));
            }
        }
    }

    /// "Backup This List".
    pub fn backup(&mut self) {
        match self.editor.backup() {
            Ok(dest) => {
                self.status_message = format!("Backup written to {}", dest.display());
                self.notice = Some(Notice::info(
                    "Success",
                    format!("Backup created successfully at:\n{}", dest.display()),
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create backup");
                self.notice = Some(Notice::error("Error", format!("Error creating backup: {e}")));
            }
        }
    }
}
