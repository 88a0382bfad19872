//! # Command Layer
//!
//! One module per user command. Each `run` takes the store (and whatever else it
//! needs, such as the current time) as plain arguments and returns a
//! [`CmdResult`]. Nothing here prints or exits; turning a `CmdResult` into
//! terminal output is the binary's job.

use crate::backup::BackupSlot;
use crate::health::HealthReport;
use crate::index::DisplayIndex;
use crate::model::{Entry, ParseWarning};

pub mod backups;
pub mod delete;
pub mod doctor;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod log;
pub mod purge;
pub mod undo;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// An entry together with the number the user addresses it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub index: DisplayIndex,
    pub entry: Entry,
}

impl ListedEntry {
    pub fn new(position: usize, entry: Entry) -> Self {
        Self {
            index: DisplayIndex::from_position(position),
            entry,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackupListing {
    pub slot: BackupSlot,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<ListedEntry>,
    pub listed_entries: Vec<ListedEntry>,
    /// Lines skipped while reading; always surfaced alongside the output.
    pub warnings: Vec<ParseWarning>,
    pub backups: Vec<BackupListing>,
    pub health: Option<HealthReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<ListedEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<ListedEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<ParseWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_backups(mut self, backups: Vec<BackupListing>) -> Self {
        self.backups = backups;
        self
    }

    pub fn with_health(mut self, report: HealthReport) -> Self {
        self.health = Some(report);
        self
    }

    pub fn total_minutes(&self) -> i64 {
        self.listed_entries
            .iter()
            .map(|le| le.entry.duration_minutes)
            .sum()
    }
}
