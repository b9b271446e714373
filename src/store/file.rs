//! Directory-backed blob store.
//!
//! # Responsibilities
//! - Persist one file per key under a root directory
//! - Reject keys that could escape the root
//!
//! # Design Decisions
//! - Keys are restricted to `[A-Za-z0-9_-]`; tenant labels come straight
//!   from the Host header and must never be used as raw paths
//! - Writes go through a temp file + rename so a concurrent reader never
//!   observes a partially written value

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::store::{BlobStore, StoreError};

/// Blob store that keeps each value in `<root>/<key>`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        tracing::info!(path = ?root, "File store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        is_valid_key(key).then(|| self.root.join(key))
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[async_trait]
impl BlobStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(path) = self.path_for(key) else {
            // Such a key can never have been written.
            return Ok(None);
        };

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self
            .path_for(key)
            .ok_or_else(|| StoreError::InvalidKey(key.to_string()))?;
        let tmp = self.root.join(format!(".{}.{}.tmp", key, Uuid::new_v4()));

        fs::write(&tmp, value).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        assert!(store.get("nothing").await.unwrap().is_none());

        store.put("abc123", "type A { x: String }").await.unwrap();
        assert_eq!(
            store.get("abc123").await.unwrap().as_deref(),
            Some("type A { x: String }")
        );
    }

    #[tokio::test]
    async fn test_overwrite_same_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        store.put("k", "same").await.unwrap();
        store.put("k", "same").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("same"));

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temp files must not be left behind");
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("specs")).await.unwrap();

        assert!(store.get("../etc").await.unwrap().is_none());
        assert!(store.get("").await.unwrap().is_none());
        assert!(matches!(
            store.put("a/b", "x").await,
            Err(StoreError::InvalidKey(_))
        ));
    }
}
