//! # Storage Layer
//!
//! Entries live in a single line-oriented file, one JSON object per line. The
//! [`EntryStore`] trait abstracts that file so the command layer can be tested
//! against [`memory::InMemoryStore`] without touching the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: the production store, plus its backup ring
//!   (see [`crate::backup`])
//! - [`memory::InMemoryStore`]: raw lines held in a `Vec`, for tests
//!
//! ## Reading
//!
//! Every read goes through [`decode_lines`]: a line that fails to decode is
//! skipped and reported as a [`ParseWarning`], it never fails the read. One bad
//! line must not hide the rest of the log.
//!
//! ## Writing
//!
//! Appends add one line. Every other mutation is "read everything, change it in
//! memory, rewrite everything" through [`EntryStore::rewrite_all`], which
//! implementations must make atomic. Entries are addressed by position, so a
//! rewrite keeps the relative order of the entries it is given.
//!
//! A rewrite only contains decodable entries: lines reported as warnings are
//! dropped from the live file. The backup taken before each destructive rewrite
//! still holds them.

use crate::backup::BackupSlot;
use crate::codec;
use crate::error::{Result, WorklogError};
use crate::model::{Entry, ParseWarning};
use tracing::warn;

pub mod fs;
pub mod memory;

/// Everything a read produced: the decodable entries in file order, and one
/// warning per line that was skipped.
#[derive(Debug, Default, Clone)]
pub struct ReadOutcome {
    pub entries: Vec<Entry>,
    pub warnings: Vec<ParseWarning>,
}

impl ReadOutcome {
    /// Soft-deleted entries with their 0-based position in the full sequence.
    pub fn deleted(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_deleted())
    }

    pub fn into_active(self) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .filter(|e| !e.is_deleted())
                .collect(),
            warnings: self.warnings,
        }
    }
}

/// Abstract interface over the entry file.
pub trait EntryStore {
    /// Append one entry, creating the file (and its directory) if needed.
    fn append(&mut self, entry: &Entry) -> Result<()>;

    /// Read every line, skipping and reporting the ones that fail to decode.
    /// A store that does not exist yet reads as empty.
    fn read_all(&self) -> Result<ReadOutcome>;

    /// Replace the whole content with `entries`, in order.
    /// MUST be atomic: readers see either the old or the new content.
    fn rewrite_all(&mut self, entries: &[Entry]) -> Result<()>;

    /// Number of raw lines, decodable or not.
    fn line_count(&self) -> Result<usize>;

    /// Snapshot the current content into the backup ring.
    /// Returns `false` when there was nothing to back up.
    fn create_backup(&mut self) -> Result<bool>;

    /// Backup slots that exist, most recent first.
    fn list_backups(&self) -> Result<Vec<BackupSlot>>;

    /// Replace the content with backup `slot`, backing up the current content first.
    fn restore_backup(&mut self, slot: usize) -> Result<()>;

    fn read_active(&self) -> Result<ReadOutcome> {
        Ok(self.read_all()?.into_active())
    }

    fn update_at(&mut self, index: usize, entry: Entry) -> Result<()> {
        let mut entries = self.read_for_rewrite()?;
        check_index(index, entries.len())?;
        entries[index] = entry;
        self.rewrite_all(&entries)
    }

    fn delete_at(&mut self, index: usize) -> Result<Entry> {
        let mut entries = self.read_for_rewrite()?;
        check_index(index, entries.len())?;
        let removed = entries.remove(index);
        self.rewrite_all(&entries)?;
        Ok(removed)
    }

    /// `read_all` for callers about to rewrite: the entries alone, with a log
    /// line for each corrupted line the rewrite is going to drop.
    fn read_for_rewrite(&self) -> Result<Vec<Entry>> {
        let outcome = self.read_all()?;
        for warning in &outcome.warnings {
            warn!(line = warning.line_number, "dropping undecodable line on rewrite");
        }
        Ok(outcome.entries)
    }
}

/// Decodes raw lines, numbering them from 1 in file order.
pub fn decode_lines<'a, I>(lines: I) -> ReadOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = ReadOutcome::default();
    for (i, line) in lines.into_iter().enumerate() {
        match codec::decode(line) {
            Ok(entry) => outcome.entries.push(entry),
            Err(e) => {
                let warning = ParseWarning::new(i + 1, line, &e);
                warn!(line = warning.line_number, error = %e, "skipping corrupted line");
                outcome.warnings.push(warning);
            }
        }
    }
    outcome
}

/// Bounds check shared by every positional operation.
pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(WorklogError::IndexOutOfRange {
            number: index.saturating_add(1),
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line(description: &str) -> String {
        codec::encode(&Entry::new(Utc::now(), description, 10)).unwrap()
    }

    fn check_skip_and_report(bad: &[usize], total: usize) {
        let lines: Vec<String> = (0..total)
            .map(|i| {
                if bad.contains(&i) {
                    format!("{{corrupt line {}", i)
                } else {
                    line(&format!("entry {}", i))
                }
            })
            .collect();

        let outcome = decode_lines(lines.iter().map(String::as_str));

        assert_eq!(outcome.entries.len(), total - bad.len());
        assert_eq!(outcome.warnings.len(), bad.len());
        let numbers: Vec<usize> = outcome.warnings.iter().map(|w| w.line_number).collect();
        let expected: Vec<usize> = bad.iter().map(|i| i + 1).collect();
        assert_eq!(numbers, expected);

        let descriptions: Vec<String> = outcome
            .entries
            .iter()
            .map(|e| e.description.clone())
            .collect();
        let expected: Vec<String> = (0..total)
            .filter(|i| !bad.contains(i))
            .map(|i| format!("entry {}", i))
            .collect();
        assert_eq!(descriptions, expected);
    }

    #[test]
    fn skips_bad_first_line() {
        check_skip_and_report(&[0], 4);
    }

    #[test]
    fn skips_bad_middle_lines() {
        check_skip_and_report(&[1, 2], 5);
    }

    #[test]
    fn skips_bad_last_line() {
        check_skip_and_report(&[3], 4);
    }

    #[test]
    fn reports_every_line_when_all_are_bad() {
        check_skip_and_report(&[0, 1, 2], 3);
    }

    #[test]
    fn deleted_keeps_original_positions() {
        let mut deleted = Entry::new(Utc::now(), "b", 5);
        deleted.deleted_at = Some(Utc::now());
        let outcome = ReadOutcome {
            entries: vec![Entry::new(Utc::now(), "a", 5), deleted, Entry::new(Utc::now(), "c", 5)],
            warnings: Vec::new(),
        };

        assert_eq!(outcome.deleted().map(|(i, _)| i).collect::<Vec<_>>(), vec![1]);
        let active = outcome.into_active();
        assert_eq!(
            active.entries.iter().map(|e| e.description.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn check_index_reports_one_based_number() {
        assert!(check_index(2, 3).is_ok());
        assert!(matches!(
            check_index(3, 3),
            Err(WorklogError::IndexOutOfRange { number: 4, len: 3 })
        ));
    }
}
