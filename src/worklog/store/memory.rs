use super::{decode_lines, EntryStore, ReadOutcome};
use crate::backup::{BackupSlot, MAX_BACKUP_COUNT};
use crate::codec;
use crate::error::{Result, WorklogError};
use crate::model::Entry;
use std::path::PathBuf;

/// In-memory storage for testing.
///
/// Holds raw lines rather than entries so corrupted content can be injected
/// with [`InMemoryStore::push_raw_line`]. `None` means "no file yet".
#[derive(Default)]
pub struct InMemoryStore {
    lines: Option<Vec<String>>,
    backups: Vec<Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_raw_line(&mut self, line: impl Into<String>) {
        self.lines.get_or_insert_with(Vec::new).push(line.into());
    }

    pub fn raw_lines(&self) -> &[String] {
        self.lines.as_deref().unwrap_or(&[])
    }

    pub fn backup_count(&self) -> usize {
        self.backups.len()
    }
}

impl EntryStore for InMemoryStore {
    fn append(&mut self, entry: &Entry) -> Result<()> {
        let line = codec::encode(entry)?;
        self.push_raw_line(line);
        Ok(())
    }

    fn read_all(&self) -> Result<ReadOutcome> {
        Ok(decode_lines(self.raw_lines().iter().map(String::as_str)))
    }

    fn rewrite_all(&mut self, entries: &[Entry]) -> Result<()> {
        let lines = entries
            .iter()
            .map(codec::encode)
            .collect::<Result<Vec<_>>>()?;
        self.lines = Some(lines);
        Ok(())
    }

    fn line_count(&self) -> Result<usize> {
        Ok(self.raw_lines().len())
    }

    fn create_backup(&mut self) -> Result<bool> {
        let Some(lines) = &self.lines else {
            return Ok(false);
        };
        self.backups.insert(0, lines.clone());
        self.backups.truncate(MAX_BACKUP_COUNT);
        Ok(true)
    }

    fn list_backups(&self) -> Result<Vec<BackupSlot>> {
        Ok((1..=self.backups.len())
            .map(|number| BackupSlot {
                number,
                path: PathBuf::from(format!("memory.bak.{}", number)),
                modified: None,
            })
            .collect())
    }

    fn restore_backup(&mut self, slot: usize) -> Result<()> {
        if !(1..=MAX_BACKUP_COUNT).contains(&slot) {
            return Err(WorklogError::BackupOutOfRange {
                slot,
                max: MAX_BACKUP_COUNT,
            });
        }
        let snapshot = self
            .backups
            .get(slot - 1)
            .cloned()
            .ok_or(WorklogError::BackupNotFound(slot))?;
        self.create_backup()?;
        self.lines = Some(snapshot);
        Ok(())
    }
}
