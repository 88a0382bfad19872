use crate::commands::CmdMessage;
use crate::error::{Result, WorklogError};
use crate::index::DisplayIndex;
use crate::store::{check_index, ReadOutcome};

/// Converts user numbers to positions, checking all of them against `outcome`
/// before anything is changed.
pub fn resolve_positions(outcome: &ReadOutcome, indexes: &[DisplayIndex]) -> Result<Vec<usize>> {
    if indexes.is_empty() {
        return Err(WorklogError::Api("No entry number given".into()));
    }
    let len = outcome.entries.len();

    indexes
        .iter()
        .map(|idx| {
            let position = idx.position().ok_or(WorklogError::IndexOutOfRange {
                number: idx.0,
                len,
            })?;
            check_index(position, len)?;
            Ok(position)
        })
        .collect()
}

pub fn resolve_position(outcome: &ReadOutcome, index: DisplayIndex) -> Result<usize> {
    let positions = resolve_positions(outcome, &[index])?;
    Ok(positions[0])
}

/// Shown after a rewrite that left unreadable lines out of the live file.
pub fn dropped_lines_message(count: usize) -> CmdMessage {
    CmdMessage::warning(format!(
        "Dropped {} unreadable line{} from the log; backup 1 still has {}.",
        count,
        if count == 1 { "" } else { "s" },
        if count == 1 { "it" } else { "them" }
    ))
}

/// Trimmed tags, de-duplicated ignoring case; empty ones are dropped.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().trim_start_matches('#');
        if tag.is_empty() || normalized.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        normalized.push(tag.to_string());
    }
    normalized
}
