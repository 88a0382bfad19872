use crate::error::{Result, WorklogError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "entries.jsonl";
const DEFAULT_RETENTION_DAYS: i64 = 7;

/// Configuration for worklog, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorklogConfig {
    /// Name of the entry file inside the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Soft-deleted entries older than this are purged on the next delete
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}

impl Default for WorklogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            retention_days: default_retention_days(),
        }
    }
}

impl WorklogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(WorklogError::Io)?;
        let config: WorklogConfig = serde_json::from_str(&content).map_err(|e| {
            WorklogError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(WorklogError::Config("data_file cannot be empty".into()));
        }
        if self.retention_days < 1 {
            return Err(WorklogError::Config(format!(
                "retention_days must be at least 1, got {}",
                self.retention_days
            )));
        }
        Ok(())
    }

    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.data_file)
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::try_days(self.retention_days).unwrap_or(chrono::Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = WorklogConfig::default();
        assert_eq!(config.data_file, "entries.jsonl");
        assert_eq!(config.retention(), chrono::Duration::days(7));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = WorklogConfig::load(temp.path()).unwrap();
        assert_eq!(config, WorklogConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"retention_days": 30}"#).unwrap();

        let config = WorklogConfig::load(temp.path()).unwrap();
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.data_file, "entries.jsonl");
        assert_eq!(
            config.store_path(temp.path()),
            temp.path().join("entries.jsonl")
        );
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "{not json").unwrap();
        assert!(matches!(
            WorklogConfig::load(temp.path()),
            Err(WorklogError::Config(_))
        ));

        for days in ["-1", "0"] {
            fs::write(
                temp.path().join(CONFIG_FILENAME),
                format!(r#"{{"retention_days": {}}}"#, days),
            )
            .unwrap();
            assert!(matches!(
                WorklogConfig::load(temp.path()),
                Err(WorklogError::Config(_))
            ));
        }
    }
}
