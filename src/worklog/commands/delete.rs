use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::lifecycle;
use crate::store::EntryStore;
use chrono::{DateTime, Duration, Utc};

use super::helpers::{dropped_lines_message, resolve_positions};

/// Soft-deletes the given entries and purges deletions older than `retention`,
/// as a single backed-up rewrite.
pub fn run<S: EntryStore>(
    store: &mut S,
    indexes: &[DisplayIndex],
    now: DateTime<Utc>,
    retention: Duration,
) -> Result<CmdResult> {
    let outcome = store.read_all()?;
    let positions = resolve_positions(&outcome, indexes)?;
    let batch = lifecycle::soft_delete_many(store, &positions, now, retention)?;

    let mut result = CmdResult::default();
    for (position, entry) in batch.deleted {
        let listed = ListedEntry::new(position, entry);
        result.add_message(CmdMessage::success(format!(
            "Entry deleted ({}): {}",
            listed.index, listed.entry.description
        )));
        result.affected_entries.push(listed);
    }
    result.add_message(CmdMessage::info("Undo restores the most recent deletion."));

    if batch.purged > 0 {
        result.add_message(CmdMessage::info(format!(
            "Purged {} entr{} deleted more than {} days ago.",
            batch.purged,
            if batch.purged == 1 { "y" } else { "ies" },
            retention.num_days()
        )));
    }
    if !outcome.warnings.is_empty() {
        result.add_message(dropped_lines_message(outcome.warnings.len()));
    }

    Ok(result.with_warnings(outcome.warnings))
}
