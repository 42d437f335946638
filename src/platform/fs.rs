// bzexclude - platform/fs.rs
//
// Filesystem access for the rules file: read, atomic write, and timestamped
// backup copies.

use crate::util::constants::{
    BACKUP_INFIX, BACKUP_TIMESTAMP_FORMAT, MAX_RULES_FILE_SIZE, TEMP_FILE_SUFFIX,
};
use crate::util::error::{BackupError, ExclusionError, Result, RuleError};
use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn io_error(path: &Path, operation: &'static str, source: io::Error) -> ExclusionError {
    ExclusionError::Io {
        path: path.to_path_buf(),
        operation,
        source,
    }
}

/// Read the whole rules file as UTF-8 text.
pub fn read_rules_file(path: &Path) -> Result<String> {
    let meta = fs::metadata(path).map_err(|e| io_error(path, "stat", e))?;
    if meta.len() > MAX_RULES_FILE_SIZE {
        return Err(RuleError::FileTooLarge {
            size: meta.len(),
            max_size: MAX_RULES_FILE_SIZE,
        }
        .into());
    }
    let content = fs::read_to_string(path).map_err(|e| io_error(path, "read", e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Rules file read");
    Ok(content)
}

/// Replace the rules file with `content` atomically (write temp, rename).
///
/// The temp file lives next to the target so the rename never crosses a
/// filesystem boundary. The original file's permissions are carried over.
pub fn write_rules_file(path: &Path, content: &str) -> Result<()> {
    let tmp = sibling_with_suffix(path, TEMP_FILE_SUFFIX);

    let out = fs::File::create(&tmp).map_err(|e| io_error(&tmp, "write", e))?;
    fill_or_discard(&mut content.as_bytes(), out, &tmp)
        .map_err(|e| io_error(&tmp, "write", e))?;

    if let Ok(meta) = fs::metadata(path) {
        if let Err(e) = fs::set_permissions(&tmp, meta.permissions()) {
            tracing::warn!(path = %tmp.display(), error = %e, "Could not copy permissions to temp file");
        }
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        io_error(path, "replace", e)
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Rules file written");
    Ok(())
}

/// Where a backup taken at `now` goes: `<path>_bak<ddmmyyHHMMSS>`, or the
/// same file name inside `backup_dir` when one is configured.
pub fn backup_path(path: &Path, now: DateTime<Local>, backup_dir: Option<&Path>) -> PathBuf {
    let suffix = format!("{BACKUP_INFIX}{}", now.format(BACKUP_TIMESTAMP_FORMAT));
    match (backup_dir, path.file_name()) {
        (Some(dir), Some(name)) => {
            let mut name = name.to_os_string();
            name.push(&suffix);
            dir.join(name)
        }
        _ => sibling_with_suffix(path, &suffix),
    }
}

/// Copy the rules file to a timestamped backup and return the new path.
///
/// Never overwrites: two backups within the same second fail with
/// `BackupError::AlreadyExists`. Permissions and modification time follow
/// the source.
pub fn create_backup(path: &Path, backup_dir: Option<&Path>) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(BackupError::SourceNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    if let Some(dir) = backup_dir {
        fs::create_dir_all(dir).map_err(|e| io_error(dir, "create backup directory", e))?;
    }

    let dest = backup_path(path, Local::now(), backup_dir);
    let copy_err = |source: io::Error| BackupError::Copy {
        from: path.to_path_buf(),
        to: dest.clone(),
        source,
    };

    let mut src = fs::File::open(path).map_err(copy_err)?;
    let out = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&dest)
    {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(BackupError::AlreadyExists { path: dest.clone() }.into());
        }
        Err(e) => return Err(copy_err(e).into()),
    };
    let out = fill_or_discard(&mut src, out, &dest).map_err(copy_err)?;

    // Metadata is best effort; a backup with fresh timestamps is still a backup.
    match src.metadata() {
        Ok(meta) => {
            if let Err(e) = fs::set_permissions(&dest, meta.permissions()) {
                tracing::debug!(path = %dest.display(), error = %e, "Could not copy permissions to backup");
            }
            if let Ok(modified) = meta.modified() {
                if let Err(e) = out.set_modified(modified) {
                    tracing::debug!(path = %dest.display(), error = %e, "Could not copy mtime to backup");
                }
            }
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Could not read source metadata");
        }
    }

    tracing::info!(from = %path.display(), to = %dest.display(), "Backup created");
    Ok(dest)
}

/// Copy `src` into the freshly created file `out` at `dest`. On failure the
/// file is closed and deleted so a partial copy is never left behind.
fn fill_or_discard<R: io::Read>(
    src: &mut R,
    mut out: fs::File,
    dest: &Path,
) -> io::Result<fs::File> {
    match io::copy(src, &mut out) {
        Ok(_) => Ok(out),
        Err(e) => {
            drop(out);
            if let Err(rm) = fs::remove_file(dest) {
                tracing::warn!(path = %dest.display(), error = %rm, "Could not remove partial file");
            }
            Err(e)
        }
    }
}

/// `path` with `suffix` appended to its final component.
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
