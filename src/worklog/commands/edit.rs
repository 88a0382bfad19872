use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::duration::parse_duration;
use crate::error::{Result, WorklogError};
use crate::index::DisplayIndex;
use crate::store::EntryStore;

use super::helpers::{dropped_lines_message, normalize_tags, resolve_position};

/// Fields to change on an existing entry; `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub description: Option<String>,
    pub duration: Option<String>,
    pub project: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.duration.is_none()
            && self.project.is_none()
            && self.tags.is_none()
    }
}

pub fn run<S: EntryStore>(store: &mut S, index: DisplayIndex, update: EntryUpdate) -> Result<CmdResult> {
    if update.is_empty() {
        return Err(WorklogError::Api("Nothing to change".into()));
    }
    let mut outcome = store.read_all()?;
    let position = resolve_position(&outcome, index)?;
    let mut entry = outcome.entries.swap_remove(position);

    if let Some(description) = update.description {
        let description = description.trim();
        if description.is_empty() {
            return Err(WorklogError::Api("Description cannot be empty".into()));
        }
        entry.description = description.to_string();
    }
    if let Some(duration) = update.duration {
        entry.duration_minutes = parse_duration(&duration)?;
        entry.raw_input = duration.trim().to_string();
    }
    if let Some(project) = update.project {
        entry.project = project.trim().to_string();
    }
    if let Some(tags) = update.tags {
        entry.tags = normalize_tags(&tags);
    }

    store.create_backup()?;
    store.update_at(position, entry.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry updated ({}): {}",
        index, entry.description
    )));
    if !outcome.warnings.is_empty() {
        result.add_message(dropped_lines_message(outcome.warnings.len()));
    }
    Ok(result
        .with_affected_entries(vec![ListedEntry::new(position, entry)])
        .with_warnings(outcome.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;
    use crate::store::memory::InMemoryStore;
    use chrono::Utc;

    fn store_with_one() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store
            .append(&Entry::new(Utc::now(), "draft", 30).with_project("acme"))
            .unwrap();
        store
    }

    #[test]
    fn updates_selected_fields_only() {
        let mut store = store_with_one();
        let update = EntryUpdate {
            duration: Some("1h".into()),
            tags: Some(vec!["deep-work".into()]),
            ..Default::default()
        };

        run(&mut store, DisplayIndex(1), update).unwrap();

        let entry = &store.read_all().unwrap().entries[0];
        assert_eq!(entry.description, "draft");
        assert_eq!(entry.project, "acme");
        assert_eq!(entry.duration_minutes, 60);
        assert_eq!(entry.raw_input, "1h");
        assert_eq!(entry.tags, vec!["deep-work"]);
        assert_eq!(store.backup_count(), 1);
    }

    #[test]
    fn carries_warnings_for_dropped_lines() {
        let mut store = store_with_one();
        store.push_raw_line("not an entry");
        let update = EntryUpdate {
            description: Some("final".into()),
            ..Default::default()
        };

        let result = run(&mut store, DisplayIndex(1), update).unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(store.raw_lines().len(), 1);
        assert_eq!(store.read_all().unwrap().entries[0].description, "final");
    }

    #[test]
    fn rejects_bad_input_without_writing() {
        let mut store = store_with_one();
        let before = store.raw_lines().to_vec();

        assert!(run(&mut store, DisplayIndex(1), EntryUpdate::default()).is_err());
        let bad_duration = EntryUpdate {
            duration: Some("forever".into()),
            ..Default::default()
        };
        assert!(run(&mut store, DisplayIndex(1), bad_duration).is_err());
        let out_of_range = EntryUpdate {
            description: Some("x".into()),
            ..Default::default()
        };
        assert!(matches!(
            run(&mut store, DisplayIndex(2), out_of_range),
            Err(WorklogError::IndexOutOfRange { .. })
        ));

        assert_eq!(store.raw_lines(), before.as_slice());
        assert_eq!(store.backup_count(), 0);
    }
}
