//! One [`Entry`] per line of JSON.
//!
//! The codec is the only place that knows the on-disk shape of an entry. Decoding
//! is strict about syntax (empty, truncated or trailing garbage all fail) and
//! lenient about optional fields, which default when absent.

use crate::error::{Result, WorklogError};
use crate::model::Entry;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("empty line")]
    Empty,

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes an entry to a single line, without the trailing newline.
pub fn encode(entry: &Entry) -> Result<String> {
    serde_json::to_string(entry).map_err(WorklogError::Serialization)
}

pub fn decode(line: &str) -> std::result::Result<Entry, DecodeError> {
    if line.trim().is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}
