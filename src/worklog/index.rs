//! User-facing entry numbers.
//!
//! Entries are identified by their position in the store file. Internally that
//! position is 0-based; users see and type it 1-based. The number shown next to
//! an entry in `list` is always its position in the *whole* file, deleted
//! entries included, so numbers stay valid across soft deletes and undos.

use crate::error::WorklogError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl DisplayIndex {
    pub fn from_position(position: usize) -> Self {
        Self(position + 1)
    }

    /// 0-based position, `None` for the out-of-range index `0`.
    pub fn position(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = WorklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<usize>()
            .map(DisplayIndex)
            .map_err(|_| WorklogError::InvalidIndex(format!("'{}' is not an entry number", s)))
    }
}
