use crate::api::WorklogApi;
use crate::config::WorklogConfig;
use crate::error::Result;
use crate::paths::PathProvider;
use crate::store::fs::FileStore;
use std::path::PathBuf;

pub struct WorklogContext {
    pub api: WorklogApi<FileStore>,
    pub store_path: PathBuf,
}

/// Resolves the data directory, loads its config and opens the store.
///
/// `store_override` replaces the configured store file (the `--file` flag);
/// config is still read from the data directory.
pub fn initialize<P: PathProvider>(paths: &P, store_override: Option<PathBuf>) -> Result<WorklogContext> {
    let data_dir = paths.ensure_base_dir()?;
    let config = WorklogConfig::load(&data_dir)?;
    let store_path = store_override.unwrap_or_else(|| config.store_path(&data_dir));

    let store = FileStore::new(store_path.clone());
    Ok(WorklogContext {
        api: WorklogApi::new(store, config),
        store_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::FixedDir;
    use tempfile::TempDir;

    #[test]
    fn uses_configured_data_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.json"),
            r#"{"data_file": "hours.jsonl"}"#,
        )
        .unwrap();

        let ctx = initialize(&FixedDir(temp.path().to_path_buf()), None).unwrap();
        assert_eq!(ctx.store_path, temp.path().join("hours.jsonl"));
        assert_eq!(ctx.api.store().path(), ctx.store_path.as_path());
    }

    #[test]
    fn override_wins_over_config() {
        let temp = TempDir::new().unwrap();
        let custom = temp.path().join("elsewhere.jsonl");

        let ctx = initialize(&FixedDir(temp.path().join("data")), Some(custom.clone())).unwrap();
        assert_eq!(ctx.store_path, custom);
        assert!(temp.path().join("data").is_dir());
    }
}
