//! # Backup Ring
//!
//! Before any destructive rewrite the store file is copied into a small ring of
//! numbered snapshots living next to it:
//!
//! ```text
//! entries.jsonl        # live store
//! entries.jsonl.bak.1  # most recent snapshot
//! entries.jsonl.bak.2
//! entries.jsonl.bak.3  # oldest, evicted on the next backup
//! ```
//!
//! Slots are shifted outward from the oldest down, so no snapshot is overwritten
//! before its content has moved. Disk usage is bounded by
//! `MAX_BACKUP_COUNT` copies of the store.

use crate::error::{Result, WorklogError};
use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MAX_BACKUP_COUNT: usize = 3;

const BACKUP_SUFFIX: &str = ".bak.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSlot {
    pub number: usize,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

impl BackupSlot {
    pub fn is_most_recent(&self) -> bool {
        self.number == 1
    }
}

/// `<store_path>.bak.<slot>`
pub fn backup_path(store_path: &Path, slot: usize) -> PathBuf {
    let mut name = OsString::from(store_path.as_os_str());
    name.push(format!("{}{}", BACKUP_SUFFIX, slot));
    PathBuf::from(name)
}

/// Rotates the ring and copies the store into slot 1.
///
/// Returns `false` without touching anything when the store file does not exist.
pub fn create_backup(store_path: &Path) -> Result<bool> {
    if !store_path.exists() {
        debug!(path = %store_path.display(), "no store file, skipping backup");
        return Ok(false);
    }

    remove_if_present(&backup_path(store_path, MAX_BACKUP_COUNT))?;
    for slot in (1..MAX_BACKUP_COUNT).rev() {
        let from = backup_path(store_path, slot);
        let to = backup_path(store_path, slot + 1);
        match fs::rename(&from, &to) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(WorklogError::Io(e)),
        }
    }

    fs::copy(store_path, backup_path(store_path, 1)).map_err(WorklogError::Io)?;
    debug!(path = %store_path.display(), "backup created");
    Ok(true)
}

/// Existing slots, most recent first.
pub fn list_backups(store_path: &Path) -> Result<Vec<BackupSlot>> {
    let mut slots = Vec::new();
    for number in 1..=MAX_BACKUP_COUNT {
        let path = backup_path(store_path, number);
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(WorklogError::Io(e)),
        };
        let modified = meta.modified().ok().map(DateTime::<Utc>::from);
        slots.push(BackupSlot {
            number,
            path,
            modified,
        });
    }
    Ok(slots)
}

/// Checks `slot` against the ring size and returns its path if the file exists.
pub fn existing_backup(store_path: &Path, slot: usize) -> Result<PathBuf> {
    if !(1..=MAX_BACKUP_COUNT).contains(&slot) {
        return Err(WorklogError::BackupOutOfRange {
            slot,
            max: MAX_BACKUP_COUNT,
        });
    }
    let path = backup_path(store_path, slot);
    if !path.exists() {
        return Err(WorklogError::BackupNotFound(slot));
    }
    Ok(path)
}

/// Replaces the store with the content of `slot`.
///
/// The current store is backed up first, so a restore can itself be undone by
/// restoring slot 1. The chosen snapshot is read before that safety backup
/// rotates the ring.
pub fn restore_backup(store_path: &Path, slot: usize) -> Result<()> {
    let source = existing_backup(store_path, slot)?;
    let snapshot = fs::read(&source).map_err(WorklogError::Io)?;

    create_backup(store_path)?;
    replace_file(store_path, &snapshot)?;
    debug!(slot, path = %store_path.display(), "backup restored");
    Ok(())
}

/// Writes `content` to a temp file beside `target` and renames it into place.
pub(crate) fn replace_file(target: &Path, content: &[u8]) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(WorklogError::Io)?;
    }

    let stem = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    let tmp_path = dir.join(format!(".{}-{}.tmp", stem, uuid::Uuid::new_v4()));

    if let Err(e) = fs::write(&tmp_path, content) {
        let _ = fs::remove_file(&tmp_path);
        return Err(WorklogError::Io(e));
    }
    if let Err(e) = fs::rename(&tmp_path, target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(WorklogError::Io(e));
    }
    Ok(())
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(WorklogError::Io(e)),
    }
}
