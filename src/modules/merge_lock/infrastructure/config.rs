use std::env;
use std::path::PathBuf;

/// Environment variable naming the merge lock file
pub const MERGE_LOCKS_FILE_ENV: &str = "ANIMERGE_MERGE_LOCKS_FILE";
const DEFAULT_MERGE_LOCKS_FILE: &str = "merge.lock";

/// Where merge locks are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeLockStoreConfig {
    pub merge_locks_file: PathBuf,
}

impl MergeLockStoreConfig {
    pub fn new(merge_locks_file: impl Into<PathBuf>) -> Self {
        Self {
            merge_locks_file: merge_locks_file.into(),
        }
    }

    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let merge_locks_file = env::var(MERGE_LOCKS_FILE_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MERGE_LOCKS_FILE));

        Self { merge_locks_file }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.merge_locks_file.as_os_str().is_empty() {
            return Err("merge_locks_file must not be empty".to_string());
        }
        if self.merge_locks_file.is_dir() {
            return Err(format!(
                "merge_locks_file {} is a directory",
                self.merge_locks_file.display()
            ));
        }
        Ok(())
    }
}

impl Default for MergeLockStoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_LOCKS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_to_merge_lock_file() {
        let config = MergeLockStoreConfig::default();
        assert_eq!(config.merge_locks_file, PathBuf::from("merge.lock"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = MergeLockStoreConfig::new(dir.path());
        assert!(config.validate().unwrap_err().contains("directory"));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(MergeLockStoreConfig::new("").validate().is_err());
    }
}
