//! # Soft-Delete Lifecycle
//!
//! Deleting an entry only stamps `deleted_at`; the entry stays at its position
//! so every other entry keeps its number. Soft-deleted entries are removed for
//! good by a purge, either explicitly or once they age past the retention
//! window.
//!
//! ```text
//!   active ──soft_delete──▶ deleted ──purge──▶ gone
//!     ▲                        │
//!     └────────restore─────────┘
//! ```
//!
//! Each operation is one read → change in memory → atomic rewrite, preceded by
//! a backup of the current file. Index validation happens before the backup, so
//! a rejected call leaves both the store and the backup ring untouched.

use crate::error::{Result, WorklogError};
use crate::model::Entry;
use crate::store::{check_index, EntryStore};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

pub fn soft_delete<S: EntryStore>(store: &mut S, index: usize, now: DateTime<Utc>) -> Result<Entry> {
    set_deleted_at(store, index, Some(now))
}

pub fn restore<S: EntryStore>(store: &mut S, index: usize) -> Result<Entry> {
    set_deleted_at(store, index, None)
}

fn set_deleted_at<S: EntryStore>(
    store: &mut S,
    index: usize,
    deleted_at: Option<DateTime<Utc>>,
) -> Result<Entry> {
    let mut entries = store.read_for_rewrite()?;
    check_index(index, entries.len())?;

    store.create_backup()?;
    entries[index].deleted_at = deleted_at;
    store.rewrite_all(&entries)?;
    debug!(index, deleted = deleted_at.is_some(), "deletion mark updated");
    Ok(entries.swap_remove(index))
}

/// Outcome of [`soft_delete_many`].
#[derive(Debug, Default)]
pub struct BatchDelete {
    /// Each deleted entry with the position it had before the call.
    pub deleted: Vec<(usize, Entry)>,
    /// Earlier deletions dropped for having aged past the retention window.
    pub purged: usize,
}

/// Soft-deletes every position in `positions` and drops deletions at least
/// `retention` old, all in one backup and one rewrite. Slot 1 of the backup
/// ring therefore holds the content from before the whole batch.
///
/// Every position is checked before anything is written.
pub fn soft_delete_many<S: EntryStore>(
    store: &mut S,
    positions: &[usize],
    now: DateTime<Utc>,
    retention: Duration,
) -> Result<BatchDelete> {
    let mut entries = store.read_for_rewrite()?;
    for &position in positions {
        check_index(position, entries.len())?;
    }

    store.create_backup()?;
    let mut batch = BatchDelete::default();
    for &position in positions {
        entries[position].deleted_at = Some(now);
        batch.deleted.push((position, entries[position].clone()));
    }

    let before = entries.len();
    entries.retain(|e| !is_expired(e, retention, now));
    batch.purged = before - entries.len();

    store.rewrite_all(&entries)?;
    debug!(
        deleted = batch.deleted.len(),
        purged = batch.purged,
        "batch delete written"
    );
    Ok(batch)
}

/// The entry with the latest `deleted_at`, and its position. Ties go to the
/// entry further down the file.
pub fn most_recently_deleted<S: EntryStore>(store: &S) -> Result<(Entry, usize)> {
    let entries = store.read_all()?.entries;
    let mut latest: Option<(usize, DateTime<Utc>)> = None;
    for (index, entry) in entries.iter().enumerate() {
        if let Some(at) = entry.deleted_at {
            if latest.map_or(true, |(_, best)| at >= best) {
                latest = Some((index, at));
            }
        }
    }

    let (index, _) = latest.ok_or(WorklogError::NothingToRestore)?;
    let entry = entries
        .into_iter()
        .nth(index)
        .ok_or(WorklogError::NothingToRestore)?;
    Ok((entry, index))
}

/// Permanently removes every soft-deleted entry. Returns how many were dropped.
pub fn purge_deleted<S: EntryStore>(store: &mut S) -> Result<usize> {
    purge_where(store, Entry::is_deleted)
}

/// Permanently removes entries deleted at least `age` before `now`.
pub fn purge_older_than<S: EntryStore>(
    store: &mut S,
    age: Duration,
    now: DateTime<Utc>,
) -> Result<usize> {
    purge_where(store, |e| is_expired(e, age, now))
}

fn is_expired(entry: &Entry, age: Duration, now: DateTime<Utc>) -> bool {
    entry.deleted_at.is_some_and(|at| now - at >= age)
}

fn purge_where<S, F>(store: &mut S, expired: F) -> Result<usize>
where
    S: EntryStore,
    F: Fn(&Entry) -> bool,
{
    let entries = store.read_for_rewrite()?;
    let before = entries.len();
    let kept: Vec<Entry> = entries.into_iter().filter(|e| !expired(e)).collect();
    let purged = before - kept.len();

    if purged == 0 {
        return Ok(0);
    }

    store.create_backup()?;
    store.rewrite_all(&kept)?;
    debug!(purged, "purged deleted entries");
    Ok(purged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use chrono::TimeZone;

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn store_with(n: usize) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for i in 0..n {
            store
                .append(&Entry::new(t(8), format!("entry {}", i), 30))
                .unwrap();
        }
        store
    }

    fn descriptions(store: &InMemoryStore, active_only: bool) -> Vec<String> {
        let outcome = if active_only {
            store.read_active().unwrap()
        } else {
            store.read_all().unwrap()
        };
        outcome.entries.into_iter().map(|e| e.description).collect()
    }

    #[test]
    fn soft_delete_keeps_entry_in_place() {
        let mut store = store_with(3);
        let deleted = soft_delete(&mut store, 1, t(9)).unwrap();

        assert_eq!(deleted.description, "entry 1");
        assert_eq!(deleted.deleted_at, Some(t(9)));
        assert_eq!(store.read_all().unwrap().entries.len(), 3);
        assert_eq!(descriptions(&store, true), vec!["entry 0", "entry 2"]);
        assert!(store.read_all().unwrap().entries[1].is_deleted());
        assert_eq!(store.backup_count(), 1);
    }

    #[test]
    fn out_of_range_leaves_store_untouched() {
        let mut store = store_with(2);
        let before = store.raw_lines().to_vec();

        assert!(matches!(
            soft_delete(&mut store, 2, t(9)),
            Err(WorklogError::IndexOutOfRange { number: 3, len: 2 })
        ));
        assert!(matches!(
            restore(&mut store, 5),
            Err(WorklogError::IndexOutOfRange { .. })
        ));
        assert_eq!(store.raw_lines(), before.as_slice());
        assert_eq!(store.backup_count(), 0);
    }

    #[test]
    fn restore_clears_deletion() {
        let mut store = store_with(2);
        soft_delete(&mut store, 0, t(9)).unwrap();
        let restored = restore(&mut store, 0).unwrap();

        assert!(restored.deleted_at.is_none());
        assert_eq!(descriptions(&store, true), vec!["entry 0", "entry 1"]);
    }

    #[test]
    fn undo_targets_latest_deletion_not_latest_entry() {
        let mut store = store_with(3);
        soft_delete(&mut store, 2, t(9)).unwrap();
        soft_delete(&mut store, 0, t(10)).unwrap();

        let (entry, index) = most_recently_deleted(&store).unwrap();
        assert_eq!(index, 0);
        assert_eq!(entry.deleted_at, Some(t(10)));
    }

    #[test]
    fn undo_ties_go_to_later_position() {
        let mut store = store_with(3);
        soft_delete(&mut store, 0, t(9)).unwrap();
        soft_delete(&mut store, 2, t(9)).unwrap();

        let (_, index) = most_recently_deleted(&store).unwrap();
        assert_eq!(index, 2);
    }

    #[test]
    fn nothing_to_restore() {
        let store = store_with(2);
        assert!(matches!(
            most_recently_deleted(&store),
            Err(WorklogError::NothingToRestore)
        ));
        assert!(matches!(
            most_recently_deleted(&InMemoryStore::new()),
            Err(WorklogError::NothingToRestore)
        ));
    }

    #[test]
    fn purge_is_selective_and_order_preserving() {
        let mut store = store_with(4);
        soft_delete(&mut store, 1, t(9)).unwrap();
        soft_delete(&mut store, 3, t(9)).unwrap();

        assert_eq!(purge_deleted(&mut store).unwrap(), 2);
        assert_eq!(descriptions(&store, false), vec!["entry 0", "entry 2"]);
    }

    #[test]
    fn purge_with_nothing_deleted_does_not_rotate_backups() {
        let mut store = store_with(2);
        assert_eq!(purge_deleted(&mut store).unwrap(), 0);
        assert_eq!(store.backup_count(), 0);
    }

    #[test]
    fn purge_older_than_is_inclusive_at_boundary() {
        let mut store = store_with(3);
        soft_delete(&mut store, 0, t(1)).unwrap();
        soft_delete(&mut store, 1, t(5)).unwrap();
        soft_delete(&mut store, 2, t(6)).unwrap();

        let purged = purge_older_than(&mut store, Duration::hours(5), t(10)).unwrap();

        assert_eq!(purged, 2);
        assert_eq!(descriptions(&store, false), vec!["entry 2"]);
    }

    #[test]
    fn batch_delete_takes_a_single_backup() {
        let mut store = store_with(4);
        soft_delete(&mut store, 3, t(1)).unwrap();
        let backups_before = store.backup_count();

        let batch = soft_delete_many(&mut store, &[0, 2], t(10), Duration::hours(5)).unwrap();

        assert_eq!(store.backup_count(), backups_before + 1);
        assert_eq!(
            batch.deleted.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(batch.purged, 1);
        let all = store.read_all().unwrap().entries;
        assert_eq!(all.len(), 3);
        assert!(all[0].is_deleted() && !all[1].is_deleted() && all[2].is_deleted());
    }

    #[test]
    fn batch_delete_checks_every_position_first() {
        let mut store = store_with(2);
        let before = store.raw_lines().to_vec();

        assert!(matches!(
            soft_delete_many(&mut store, &[0, 2], t(9), Duration::days(7)),
            Err(WorklogError::IndexOutOfRange { number: 3, len: 2 })
        ));
        assert_eq!(store.raw_lines(), before.as_slice());
        assert_eq!(store.backup_count(), 0);
    }

    #[test]
    fn end_to_end_delete_and_undo() {
        let mut store = InMemoryStore::new();
        for i in 0..3 {
            store
                .append(&Entry::new(t(8), format!("entry {}", i), 15))
                .unwrap();
        }

        soft_delete(&mut store, 1, t(9)).unwrap();
        assert_eq!(descriptions(&store, true), vec!["entry 0", "entry 2"]);

        let (entry, index) = most_recently_deleted(&store).unwrap();
        assert_eq!((entry.description.as_str(), index), ("entry 1", 1));

        restore(&mut store, index).unwrap();
        assert_eq!(
            descriptions(&store, true),
            vec!["entry 0", "entry 1", "entry 2"]
        );
    }
}
