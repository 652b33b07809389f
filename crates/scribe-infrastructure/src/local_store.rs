//! Local persistent key/value storage.
//!
//! A flat string-keyed surface backing the snapshot cache. The file-backed
//! implementation stores one file per key under a base directory.

use async_trait::async_trait;
use scribe_core::error::{Result, ScribeError};
use std::path::{Path, PathBuf};

/// A flat string-keyed key/value store.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Reads the value for a key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: key present
    /// - `Ok(None)`: key absent
    /// - `Err(_)`: read failure other than absence
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes the value for a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed [`LocalStore`] with one file per key.
///
/// Directory layout:
/// ```text
/// base_dir/
/// ├── scribe.session.v1
/// └── scribe.teacher_session.v1.class-3-2
/// ```
pub struct FileLocalStore {
    base_dir: PathBuf,
}

impl FileLocalStore {
    /// Creates a store rooted at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir).map_err(|err| {
            ScribeError::io(format!(
                "Failed to create local store directory {:?}: {}",
                base_dir, err
            ))
        })?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the default location (`<config dir>/scribe`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or the
    /// directory cannot be created.
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScribeError::io("Failed to get config directory"))?;
        Self::new(config_dir.join("scribe"))
    }

    fn file_path(&self, key: &str) -> PathBuf {
        // Keys become file names directly; anything outside a safe
        // character set is replaced so a key can never escape the base dir.
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(sanitized)
    }
}

#[async_trait]
impl LocalStore for FileLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);
        tokio::fs::write(&path, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.file_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(dir.path()).unwrap();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(dir.path()).unwrap();
        store.set("scribe.session.v1", "{\"a\":1}").await.unwrap();
        assert_eq!(
            store.get("scribe.session.v1").await.unwrap(),
            Some("{\"a\":1}".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(dir.path()).unwrap();
        store.set("key", "value").await.unwrap();
        store.remove("key").await.unwrap();
        store.remove("key").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_cannot_escape_base_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileLocalStore::new(dir.path()).unwrap();
        store.set("../escape", "value").await.unwrap();
        assert!(dir.path().join(".._escape").exists());
    }
}
