//! Listing and restoring backup snapshots.
//!
//! Range and existence checks, and the safety backup taken before a restore,
//! live in the store (see [`crate::backup`]); this module sequences the calls
//! and labels the results.

use crate::backup::BackupSlot;
use crate::commands::{BackupListing, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::EntryStore;

pub fn label(slot: &BackupSlot) -> String {
    if slot.is_most_recent() {
        "most recent".to_string()
    } else {
        format!("{} back", slot.number)
    }
}

pub fn list<S: EntryStore>(store: &S) -> Result<CmdResult> {
    let listings: Vec<BackupListing> = store
        .list_backups()?
        .into_iter()
        .map(|slot| BackupListing {
            label: label(&slot),
            slot,
        })
        .collect();

    let mut result = CmdResult::default();
    if listings.is_empty() {
        result.add_message(CmdMessage::info(
            "No backups yet. One is taken before every delete, purge or restore.",
        ));
    }
    Ok(result.with_backups(listings))
}

pub fn restore<S: EntryStore>(store: &mut S, slot: usize) -> Result<CmdResult> {
    store.restore_backup(slot)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Restored backup {}.", slot)));
    result.add_message(CmdMessage::info(
        "The previous state was saved as backup 1.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorklogError;
    use crate::model::Entry;
    use crate::store::memory::InMemoryStore;
    use chrono::Utc;

    #[test]
    fn labels_most_recent_slot() {
        let mut store = InMemoryStore::new();
        store.append(&Entry::new(Utc::now(), "a", 5)).unwrap();
        store.create_backup().unwrap();
        store.create_backup().unwrap();

        let result = list(&store).unwrap();
        let labels: Vec<&str> = result.backups.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["most recent", "2 back"]);
    }

    #[test]
    fn empty_list_has_hint() {
        let result = list(&InMemoryStore::new()).unwrap();
        assert!(result.backups.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn restore_distinguishes_range_from_missing() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            restore(&mut store, 4),
            Err(WorklogError::BackupOutOfRange { slot: 4, max: 3 })
        ));
        assert!(matches!(
            restore(&mut store, 1),
            Err(WorklogError::BackupNotFound(1))
        ));
    }

    #[test]
    fn restore_brings_back_snapshot() {
        let mut store = InMemoryStore::new();
        store.append(&Entry::new(Utc::now(), "kept", 5)).unwrap();
        store.create_backup().unwrap();
        store.rewrite_all(&[]).unwrap();

        restore(&mut store, 1).unwrap();

        let entries = store.read_all().unwrap().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "kept");
        assert_eq!(store.backup_count(), 2);
    }
}
