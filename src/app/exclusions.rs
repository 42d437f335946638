// bzexclude - app/exclusions.rs
//
// The editable rules file: load for display, add a path, remove a
// selection, back up. Each operation re-reads the file so edits made by the
// backup client in the meantime are never clobbered by a stale copy.

use crate::core::model::{DisplayEntry, ExclusionRule, PathKind, Platform};
use crate::core::{rules, splice};
use crate::platform::fs;
use crate::util::error::{Result, RuleError};
use std::path::{Path, PathBuf};

/// A rules file on disk together with the platform whose rules are edited.
#[derive(Debug, Clone)]
pub struct ExclusionFile {
    path: PathBuf,
    platform: Platform,
    backup_dir: Option<PathBuf>,
}

impl ExclusionFile {
    pub fn new(path: PathBuf, platform: Platform, backup_dir: Option<PathBuf>) -> Self {
        Self {
            path,
            platform,
            backup_dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Display entries for this platform, in file order.
    pub fn load(&self) -> Result<Vec<DisplayEntry>> {
        let content = fs::read_rules_file(&self.path)?;
        let parsed = rules::parse_rules(&content);
        let entries = rules::display_entries(&parsed, self.platform);
        tracing::info!(
            path = %self.path.display(),
            platform = %self.platform,
            rules = parsed.len(),
            shown = entries.len(),
            "Exclusion list loaded"
        );
        Ok(entries)
    }

    /// Append a rule for a picked file or folder and return it.
    pub fn add_path(&self, picked: &str, kind: PathKind) -> Result<ExclusionRule> {
        if picked.trim().is_empty() {
            return Err(RuleError::EmptyPath.into());
        }
        // Spaces are legal at either end of a name; trimming them would turn
        // the substring match into a broader one.
        let path = self.platform.normalise_path(picked);

        let rule = ExclusionRule::for_path(&path, kind, self.platform);
        let content = fs::read_rules_file(&self.path)?;
        let updated = splice::insert_rule(&content, &rule)?;
        fs::write_rules_file(&self.path, &updated)?;

        tracing::info!(path = %path, kind = ?kind, "Exclusion rule added");
        Ok(rule)
    }

    /// Remove the first rule whose display string equals `selected`.
    /// Returns the 1-based line number that was deleted.
    pub fn remove(&self, selected: &str) -> Result<usize> {
        let content = fs::read_rules_file(&self.path)?;
        let (updated, line) = splice::remove_rule(&content, selected)?;
        fs::write_rules_file(&self.path, &updated)?;

        tracing::info!(line, selected, "Exclusion rule removed");
        Ok(line)
    }

    /// Copy the rules file to a timestamped backup.
    pub fn backup(&self) -> Result<PathBuf> {
        fs::create_backup(&self.path, self.backup_dir.as_deref())
    }
}

/// Headless listing: one `n. text` line per entry, or a pretty JSON array of
/// `{ "number", "text" }` objects.
pub fn format_listing(entries: &[DisplayEntry], json: bool) -> serde_json::Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(entries)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(entries
        .iter()
        .map(|entry| format!("{}\n", entry.label()))
        .collect())
}
