use crate::commands::{CmdResult, ListedEntry};
use crate::error::Result;
use crate::model::Entry;
use crate::store::EntryStore;
use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    All,
    /// Since local midnight.
    Today,
    /// Since local midnight on Monday.
    Week,
}

impl Period {
    /// Start of the period in local time, `None` for [`Period::All`].
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.with_timezone(&Local).date_naive();
        let first_day = match self {
            Period::All => return None,
            Period::Today => today,
            Period::Week => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
        };
        let midnight = first_day.and_hms_opt(0, 0, 0)?;
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub period: Period,
    pub project: Option<String>,
    pub tag: Option<String>,
    /// List soft-deleted entries instead of active ones.
    pub deleted: bool,
}

impl EntryFilter {
    fn matches(&self, entry: &Entry, since: Option<DateTime<Utc>>) -> bool {
        if entry.is_deleted() != self.deleted {
            return false;
        }
        if since.is_some_and(|start| entry.timestamp < start) {
            return false;
        }
        if let Some(project) = &self.project {
            if !entry.project.eq_ignore_ascii_case(project) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !entry.has_tag(tag) {
                return false;
            }
        }
        true
    }
}

pub fn run<S: EntryStore>(store: &S, filter: &EntryFilter, now: DateTime<Utc>) -> Result<CmdResult> {
    let outcome = store.read_all()?;
    let since = filter.period.start(now);

    let listed: Vec<ListedEntry> = outcome
        .entries
        .into_iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e, since))
        .map(|(position, e)| ListedEntry::new(position, e))
        .collect();

    Ok(CmdResult::default()
        .with_listed_entries(listed)
        .with_warnings(outcome.warnings))
}
