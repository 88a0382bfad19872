use crate::error::Result;
use crate::model::ParseWarning;
use crate::store::EntryStore;

/// Result of a read-only integrity pass over the store.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub total_lines: usize,
    pub valid_count: usize,
    pub corrupted_count: usize,
    pub warnings: Vec<ParseWarning>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.corrupted_count == 0
    }
}

/// Counts raw lines, then decodes everything. Never writes.
pub fn validate<S: EntryStore>(store: &S) -> Result<HealthReport> {
    let total_lines = store.line_count()?;
    let outcome = store.read_all()?;
    Ok(HealthReport {
        total_lines,
        valid_count: outcome.entries.len(),
        corrupted_count: outcome.warnings.len(),
        warnings: outcome.warnings,
    })
}
