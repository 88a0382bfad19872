use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest prefix of a corrupted line kept in a [`ParseWarning`].
pub const WARNING_CONTENT_LIMIT: usize = 50;

/// One logged activity.
///
/// Entries have no persisted id: an entry is addressed by its position in the
/// store file. `duration_minutes` is kept signed so hand-edited values outside
/// the normal range survive a read/rewrite cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: i64,
    // What the user typed, kept for auditing the duration parser
    #[serde(default)]
    pub raw_input: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            timestamp,
            description: description.into(),
            duration_minutes,
            raw_input: String::new(),
            project: String::new(),
            tags: Vec::new(),
            deleted_at: None,
        }
    }

    pub fn with_raw_input(mut self, raw_input: impl Into<String>) -> Self {
        self.raw_input = raw_input.into();
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Tags compare case-insensitively.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// A line of the store file that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-indexed position of the line in the file.
    pub line_number: usize,
    pub content: String,
    pub error: String,
}

impl ParseWarning {
    pub fn new(line_number: usize, line: &str, error: impl ToString) -> Self {
        Self {
            line_number,
            content: truncate_content(line),
            error: error.to_string(),
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: {} ({})",
            self.line_number, self.content, self.error
        )
    }
}

fn truncate_content(line: &str) -> String {
    if line.chars().count() <= WARNING_CONTENT_LIMIT {
        return line.to_string();
    }
    let mut truncated: String = line.chars().take(WARNING_CONTENT_LIMIT).collect();
    truncated.push_str("...");
    truncated
}
