use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::error::Result;
use crate::lifecycle;
use crate::store::EntryStore;

use super::helpers::dropped_lines_message;

/// Restores the most recently soft-deleted entry.
pub fn run<S: EntryStore>(store: &mut S) -> Result<CmdResult> {
    let warnings = store.read_all()?.warnings;
    let (_, position) = lifecycle::most_recently_deleted(store)?;
    let entry = lifecycle::restore(store, position)?;
    let listed = ListedEntry::new(position, entry);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry restored ({}): {}",
        listed.index, listed.entry.description
    )));
    if !warnings.is_empty() {
        result.add_message(dropped_lines_message(warnings.len()));
    }
    Ok(result
        .with_affected_entries(vec![listed])
        .with_warnings(warnings))
}
