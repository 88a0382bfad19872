//! # API Facade
//!
//! [`WorklogApi`] is the single entry point for every worklog operation. It
//! parses user-typed entry numbers, supplies the current time and the retention
//! window, and dispatches to `commands/*.rs`. It holds no business logic of its
//! own and never prints.
//!
//! The facade is generic over the store and the clock:
//! - Production: `WorklogApi<FileStore, SystemClock>`
//! - Testing: `WorklogApi<InMemoryStore, FixedClock>`

use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::config::WorklogConfig;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::EntryStore;
use std::str::FromStr;

pub struct WorklogApi<S: EntryStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: WorklogConfig,
}

impl<S: EntryStore> WorklogApi<S, SystemClock> {
    pub fn new(store: S, config: WorklogConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: EntryStore, C: Clock> WorklogApi<S, C> {
    pub fn with_clock(store: S, config: WorklogConfig, clock: C) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn log_entry(&mut self, input: commands::log::NewEntry) -> Result<commands::CmdResult> {
        commands::log::run(&mut self.store, self.clock.now(), input)
    }

    pub fn list_entries(&self, filter: &EntryFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, filter, self.clock.now())
    }

    pub fn edit_entry<I: AsRef<str>>(
        &mut self,
        index: I,
        update: EntryUpdate,
    ) -> Result<commands::CmdResult> {
        let index = DisplayIndex::from_str(index.as_ref())?;
        commands::edit::run(&mut self.store, index, update)
    }

    pub fn delete_entries<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_indexes(indexes)?;
        commands::delete::run(
            &mut self.store,
            &indexes,
            self.clock.now(),
            self.config.retention(),
        )
    }

    pub fn undo(&mut self) -> Result<commands::CmdResult> {
        commands::undo::run(&mut self.store)
    }

    pub fn pending_purge(&self) -> Result<Vec<commands::ListedEntry>> {
        commands::purge::pending(&self.store)
    }

    pub fn purge(&mut self) -> Result<commands::CmdResult> {
        commands::purge::run(&mut self.store)
    }

    pub fn backups(&self) -> Result<commands::CmdResult> {
        commands::backups::list(&self.store)
    }

    pub fn restore_backup(&mut self, slot: usize) -> Result<commands::CmdResult> {
        commands::backups::restore(&mut self.store, slot)
    }

    pub fn doctor(&self) -> Result<commands::CmdResult> {
        commands::doctor::run(&self.store)
    }

    pub fn config(&self) -> &WorklogConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>> {
    inputs
        .iter()
        .map(|s| DisplayIndex::from_str(s.as_ref()))
        .collect()
}

pub use commands::edit::EntryUpdate;
pub use commands::list::{EntryFilter, Period};
pub use commands::log::NewEntry;
pub use commands::{BackupListing, CmdMessage, CmdResult, ListedEntry, MessageLevel};
