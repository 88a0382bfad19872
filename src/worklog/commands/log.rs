use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::duration::{format_minutes, parse_duration};
use crate::error::{Result, WorklogError};
use crate::model::Entry;
use crate::store::EntryStore;
use chrono::{DateTime, Utc};

use super::helpers::normalize_tags;

#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub duration: String,
    pub description: String,
    pub project: Option<String>,
    pub tags: Vec<String>,
}

pub fn run<S: EntryStore>(store: &mut S, now: DateTime<Utc>, input: NewEntry) -> Result<CmdResult> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(WorklogError::Api("Description cannot be empty".into()));
    }
    let minutes = parse_duration(&input.duration)?;

    let entry = Entry::new(now, description, minutes)
        .with_raw_input(input.duration.trim())
        .with_project(input.project.as_deref().map(str::trim).unwrap_or_default())
        .with_tags(normalize_tags(&input.tags));

    let existing = store.read_all()?;
    let position = existing.entries.len();
    store.append(&entry)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Logged {}: {}",
        format_minutes(minutes),
        entry.description
    )));
    Ok(result
        .with_affected_entries(vec![ListedEntry::new(position, entry)])
        .with_warnings(existing.warnings))
}
