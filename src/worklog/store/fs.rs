use super::{decode_lines, EntryStore, ReadOutcome};
use crate::backup::{self, BackupSlot};
use crate::codec;
use crate::error::{Result, WorklogError};
use crate::model::Entry;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The production store: one newline-delimited JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(WorklogError::Io)?;
            }
        }
        Ok(())
    }

    /// File content as text, `None` when the file does not exist yet.
    /// Invalid UTF-8 is replaced so one damaged line cannot fail the read.
    fn read_content(&self) -> Result<Option<String>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WorklogError::Io(e)),
        }
    }
}

impl EntryStore for FileStore {
    fn append(&mut self, entry: &Entry) -> Result<()> {
        self.ensure_parent()?;
        let mut line = codec::encode(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(WorklogError::Io)?;
        // a torn last line keeps its own line instead of swallowing this one
        if ends_mid_line(&mut file).map_err(WorklogError::Io)? {
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes()).map_err(WorklogError::Io)?;
        debug!(path = %self.path.display(), "entry appended");
        Ok(())
    }

    fn read_all(&self) -> Result<ReadOutcome> {
        match self.read_content()? {
            Some(content) => Ok(decode_lines(content.lines())),
            None => Ok(ReadOutcome::default()),
        }
    }

    fn rewrite_all(&mut self, entries: &[Entry]) -> Result<()> {
        let mut content = String::new();
        for entry in entries {
            content.push_str(&codec::encode(entry)?);
            content.push('\n');
        }
        backup::replace_file(&self.path, content.as_bytes())?;
        debug!(path = %self.path.display(), count = entries.len(), "store rewritten");
        Ok(())
    }

    fn line_count(&self) -> Result<usize> {
        Ok(self
            .read_content()?
            .map(|content| content.lines().count())
            .unwrap_or(0))
    }

    fn create_backup(&mut self) -> Result<bool> {
        backup::create_backup(&self.path)
    }

    fn list_backups(&self) -> Result<Vec<BackupSlot>> {
        backup::list_backups(&self.path)
    }

    fn restore_backup(&mut self, slot: usize) -> Result<()> {
        backup::restore_backup(&self.path, slot)
    }
}

fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("entries.jsonl"));
        (dir, store)
    }

    #[test]
    fn append_creates_file_and_directory() {
        let (_dir, mut store) = setup();
        store.append(&Entry::new(Utc::now(), "first", 10)).unwrap();

        assert!(store.path().exists());
        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert_eq!(on_disk.lines().count(), 1);
        assert!(on_disk.ends_with('\n'));
    }

    #[test]
    fn missing_file_reads_empty() {
        let (_dir, store) = setup();
        let outcome = store.read_all().unwrap();
        assert!(outcome.entries.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(store.line_count().unwrap(), 0);
        assert!(store.read_active().unwrap().entries.is_empty());
    }

    #[test]
    fn invalid_utf8_line_is_reported_not_fatal() {
        let (_dir, mut store) = setup();
        store.append(&Entry::new(Utc::now(), "good", 10)).unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        file.write_all(&[0xff, 0xfe, b'\n']).unwrap();

        let outcome = store.read_all().unwrap();
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].line_number, 2);
    }

    #[test]
    fn append_after_torn_line_starts_a_new_line() {
        let (_dir, mut store) = setup();
        store.append(&Entry::new(Utc::now(), "whole", 10)).unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        file.write_all(b"{\"timestamp\":\"2025-").unwrap();
        drop(file);

        store.append(&Entry::new(Utc::now(), "after crash", 10)).unwrap();

        let outcome = store.read_all().unwrap();
        let descriptions: Vec<&str> = outcome.entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["whole", "after crash"]);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].line_number, 2);
    }

    #[test]
    fn rewrite_preserves_order() {
        let (_dir, mut store) = setup();
        let entries: Vec<Entry> = (0..4)
            .map(|i| Entry::new(Utc::now(), format!("e{}", i), 5))
            .collect();
        store.rewrite_all(&entries).unwrap();

        let read = store.read_all().unwrap().entries;
        assert_eq!(read, entries);
    }

    #[test]
    fn reading_through_a_directory_path_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(store.read_all(), Err(WorklogError::Io(_))));
        assert!(matches!(
            store.append(&Entry::new(Utc::now(), "x", 1)),
            Err(WorklogError::Io(_))
        ));
    }
}
