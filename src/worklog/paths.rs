//! Where the data directory lives.
//!
//! Resolution is behind [`PathProvider`] so tests can point everything at a
//! temp directory instead of the user's real data directory.

use crate::error::{Result, WorklogError};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Overrides the platform data directory when set.
pub const HOME_ENV: &str = "WORKLOG_HOME";

pub trait PathProvider {
    /// The directory holding the store, its backups and `config.json`.
    fn base_dir(&self) -> Result<PathBuf>;

    /// Like [`PathProvider::base_dir`], creating the directory if missing.
    fn ensure_base_dir(&self) -> Result<PathBuf> {
        let dir = self.base_dir()?;
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(WorklogError::Io)?;
        }
        Ok(dir)
    }
}

/// `$WORKLOG_HOME`, or the platform data directory
/// (`~/.local/share/worklog` on Linux).
#[derive(Debug, Default, Clone, Copy)]
pub struct AppDirs;

impl PathProvider for AppDirs {
    fn base_dir(&self) -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        ProjectDirs::from("com", "worklog", "worklog")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| WorklogError::Config("Could not determine data directory".into()))
    }
}

/// A fixed directory, for tests.
#[derive(Debug, Clone)]
pub struct FixedDir(pub PathBuf);

impl PathProvider for FixedDir {
    fn base_dir(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}
