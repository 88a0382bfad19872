use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::error::Result;
use crate::lifecycle;
use crate::store::EntryStore;

use super::helpers::dropped_lines_message;

/// Soft-deleted entries that a purge would remove, for confirmation prompts.
pub fn pending<S: EntryStore>(store: &S) -> Result<Vec<ListedEntry>> {
    let outcome = store.read_all()?;
    Ok(outcome
        .deleted()
        .map(|(position, entry)| ListedEntry::new(position, entry.clone()))
        .collect())
}

pub fn run<S: EntryStore>(store: &mut S) -> Result<CmdResult> {
    let warnings = store.read_all()?.warnings;
    let mut result = CmdResult::default();
    let purged = lifecycle::purge_deleted(store)?;

    if purged == 0 {
        result.add_message(CmdMessage::info("No deleted entries to purge."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Purged {} deleted entr{}.",
            purged,
            if purged == 1 { "y" } else { "ies" }
        )));
        if !warnings.is_empty() {
            result.add_message(dropped_lines_message(warnings.len()));
        }
    }
    Ok(result.with_warnings(warnings))
}
