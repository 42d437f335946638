// bzexclude - tests/e2e_editor.rs
//
// End-to-end tests for the exclusion editor.
//
// These tests exercise the real filesystem: a copy of the on-disk fixture is
// loaded, edited through `ExclusionFile`, re-read, and backed up. No mocks.

use bzexclude::app::exclusions::{format_listing, ExclusionFile};
use bzexclude::core::model::{PathKind, Platform};
use bzexclude::util::error::{ExclusionError, RuleError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copy the fixture rules file into a temp dir and open it for `platform`.
fn editable_copy(platform: Platform) -> (TempDir, ExclusionFile) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bzexcluderules_editable.xml");
    fs::copy(fixture("bzexcluderules_editable.xml"), &path).unwrap();
    (dir, ExclusionFile::new(path, platform, None))
}

fn labels(file: &ExclusionFile) -> Vec<String> {
    file.load().unwrap().iter().map(|e| e.label()).collect()
}

// =============================================================================
// Loading
// =============================================================================

/// Windows rules are shown in file order; all-wildcard and mac rules are not.
#[test]
fn e2e_load_windows_entries() {
    let (_dir, file) = editable_copy(Platform::Windows);
    assert_eq!(
        labels(&file),
        vec![
            "1. Starts With: :\\$Recycle.Bin\\",
            "2. Path:  \\appdata\\local\\temp\\",
            "3. File Extension:  vmdk",
        ]
    );
}

#[test]
fn e2e_load_mac_entries() {
    let (_dir, file) = editable_copy(Platform::Mac);
    assert_eq!(
        labels(&file),
        vec![
            "1. Path:  /private/var/",
            "2. Path:  /library/caches/",
            "3. Contains:  /.Trash/",
        ]
    );
}

// =============================================================================
// Add / remove
// =============================================================================

/// A picked file is appended as the last rule with its name and extension.
#[test]
fn e2e_add_file_appends_last() {
    let (_dir, file) = editable_copy(Platform::Windows);
    file.add_path("D:/VMs/disk.vhdx", PathKind::File).unwrap();

    let shown = labels(&file);
    assert_eq!(shown.len(), 4);
    assert_eq!(
        shown[3],
        "4. Path:  D:\\VMs\\disk.vhdx  |  Ends With:  disk.vhdx  |  File Extension:  vhdx"
    );

    let content = fs::read_to_string(file.path()).unwrap();
    assert!(content.trim_end().ends_with("</bzexclusions>"));
    assert!(content.contains(
        r#"<excludefname_rule plat="win" osVers="*" ruleIsOptional="t" skipFirstCharThenStartsWith="*" contains_1="D:\VMs\disk.vhdx" contains_2="*" doesNotContain="*" endsWith="disk.vhdx" hasFileExtension="vhdx" />"#
    ));
}

/// Removing a shown entry deletes exactly its line and nothing else.
#[test]
fn e2e_remove_deletes_only_that_line() {
    let (_dir, file) = editable_copy(Platform::Mac);
    let before = fs::read_to_string(file.path()).unwrap();

    let entries = file.load().unwrap();
    let line = file.remove(&entries[1].text).unwrap();
    assert_eq!(line, 8);

    let after = fs::read_to_string(file.path()).unwrap();
    assert_eq!(after.lines().count(), before.lines().count() - 1);
    assert!(!after.contains("/library/caches/"));
    assert_eq!(
        labels(&file),
        vec!["1. Path:  /private/var/", "2. Contains:  /.Trash/"]
    );
}

/// A `Starts With` entry is removable through its displayed text.
#[test]
fn e2e_remove_starts_with_entry() {
    let (_dir, file) = editable_copy(Platform::Windows);
    let entries = file.load().unwrap();
    assert_eq!(entries[0].text, "Starts With: :\\$Recycle.Bin\\");

    let line = file.remove(&entries[0].text).unwrap();
    assert_eq!(line, 3);
    assert!(!fs::read_to_string(file.path()).unwrap().contains("Recycle.Bin"));
    assert_eq!(
        labels(&file),
        vec![
            "1. Path:  \\appdata\\local\\temp\\",
            "2. File Extension:  vmdk",
        ]
    );
}

/// `--list` output for the fixture, as text and as JSON.
#[test]
fn e2e_listing_formats() {
    let (_dir, file) = editable_copy(Platform::Mac);
    let entries = file.load().unwrap();

    assert_eq!(
        format_listing(&entries, false).unwrap(),
        "1. Path:  /private/var/\n2. Path:  /library/caches/\n3. Contains:  /.Trash/\n"
    );
    let json: serde_json::Value =
        serde_json::from_str(&format_listing(&entries, true).unwrap()).unwrap();
    assert_eq!(json[2]["text"], "Contains:  /.Trash/");
}

/// Adding then removing a folder restores the original bytes.
#[test]
fn e2e_add_then_remove_round_trips_file() {
    let (_dir, file) = editable_copy(Platform::Mac);
    let original = fs::read_to_string(file.path()).unwrap();

    let rule = file.add_path("/Users/me/Movies", PathKind::Folder).unwrap();
    file.remove(&rule.display_text().unwrap()).unwrap();

    assert_eq!(fs::read_to_string(file.path()).unwrap(), original);
}

/// A selection that is no longer in the file (edited elsewhere) is an error
/// and leaves the file untouched.
#[test]
fn e2e_remove_stale_selection() {
    let (_dir, file) = editable_copy(Platform::Mac);
    let original = fs::read_to_string(file.path()).unwrap();

    let err = file.remove("Path:  /gone/").unwrap_err();
    assert!(matches!(
        err,
        ExclusionError::Rule(RuleError::SelectionNotFound { .. })
    ));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), original);
}

/// Windows-style line endings are kept when a rule is added.
#[test]
fn e2e_crlf_file_stays_crlf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.xml");
    fs::write(&path, "<bzexclusions>\r\n</bzexclusions>\r\n").unwrap();
    let file = ExclusionFile::new(path.clone(), Platform::Windows, None);

    file.add_path("C:\\Temp", PathKind::Folder).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.replace("\r\n", "").contains('\n'), "bare LF in {content:?}");
    assert_eq!(labels(&file), vec!["1. Path:  C:\\Temp"]);
}

// =============================================================================
// Backup
// =============================================================================

/// The backup is a byte-identical sibling named `<file>_bak<ddmmyyHHMMSS>`.
#[test]
fn e2e_backup_sibling_copy() {
    let (dir, file) = editable_copy(Platform::Windows);
    let dest = file.backup().unwrap();

    assert_eq!(dest.parent().unwrap(), dir.path());
    let name = dest.file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name
        .strip_prefix("bzexcluderules_editable.xml_bak")
        .expect("backup name prefix");
    assert_eq!(stamp.len(), 12);
    assert!(stamp.chars().all(|c| c.is_ascii_digit()), "{stamp}");
    assert_eq!(fs::read(&dest).unwrap(), fs::read(file.path()).unwrap());
}

/// Backups go to the configured directory when one is set.
#[test]
fn e2e_backup_to_configured_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.xml");
    fs::copy(fixture("bzexcluderules_editable.xml"), &path).unwrap();
    let backups = dir.path().join("backups");
    let file = ExclusionFile::new(path, Platform::Mac, Some(backups.clone()));

    let dest = file.backup().unwrap();
    assert_eq!(dest.parent().unwrap(), backups);
}
