// src/storage/kv.rs
//
// Key-value medium abstraction
//
// CRITICAL RULES:
// - Media are DUMB string stores
// - NO knowledge of what the payload contains
// - NO parsing, NO schema awareness
// - Failures are reported, never swallowed, at this layer

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::FavoritesResult;

/// An opaque, possibly-failing key-value medium.
///
/// The favorites store treats the medium as a black box: one string in,
/// one string out. Both operations may fail; `get` distinguishes an
/// absent key from a failed read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KvMedium: Send + Sync {
    async fn get(&self, key: &str) -> FavoritesResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> FavoritesResult<()>;
}

/// Configuration for file-backed storage
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per key
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            data_dir: base.join("reelmark"),
        }
    }
}

/// File-backed medium: one `<key>.json` file per key under the
/// configured data directory.
///
/// Writes go to a sibling temp file first and are renamed into place,
/// so a concurrent reader never observes a torn value.
pub struct FileKvMedium {
    data_dir: PathBuf,
}

impl FileKvMedium {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            data_dir: config.data_dir,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KvMedium for FileKvMedium {
    async fn get(&self, key: &str) -> FavoritesResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> FavoritesResult<()> {
        fs::create_dir_all(&self.data_dir)?;

        let target = self.path_for(key);
        let tmp = self.data_dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

/// In-memory medium for non-durable state and tests
#[derive(Default)]
pub struct MemoryKvMedium {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvMedium for MemoryKvMedium {
    async fn get(&self, key: &str) -> FavoritesResult<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> FavoritesResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_medium_absent_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileKvMedium::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
        });

        assert_eq!(medium.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_medium_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileKvMedium::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
        });

        medium.set("user_favorites", "[]").await.unwrap();
        assert_eq!(
            medium.get("user_favorites").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_medium_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileKvMedium::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
        });

        medium.set("k", "first").await.unwrap();
        medium.set("k", "second").await.unwrap();
        assert_eq!(medium.get("k").await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_file_medium_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileKvMedium::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
        });

        medium.set("k", "value").await.unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
    }

    #[tokio::test]
    async fn test_memory_medium_round_trip() {
        let medium = MemoryKvMedium::new();

        assert_eq!(medium.get("k").await.unwrap(), None);
        medium.set("k", "v").await.unwrap();
        assert_eq!(medium.get("k").await.unwrap(), Some("v".to_string()));
    }
}
