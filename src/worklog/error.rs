use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorklogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `number` is the 1-based index the caller asked for.
    #[error("Entry {number} does not exist (the log holds {len} entries)")]
    IndexOutOfRange { number: usize, len: usize },

    #[error("Backup number must be between 1 and {max}, got {slot}")]
    BackupOutOfRange { slot: usize, max: usize },

    #[error("Backup {0} does not exist")]
    BackupNotFound(usize),

    #[error("No deleted entries to restore")]
    NothingToRestore,

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, WorklogError>;
