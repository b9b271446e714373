//! In-memory blob store.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::store::{BlobStore, StoreError};

/// A thread-safe, cloneable in-memory store.
///
/// Clones share the same underlying map, so a test can keep a handle for
/// assertions while the server owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Seed an entry directly, bypassing the async contract.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.get(key).map(|r| r.value().clone()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        store.put("abc", "type A { x: String }").await.unwrap();
        assert_eq!(
            store.get("abc").await.unwrap().as_deref(),
            Some("type A { x: String }")
        );
    }

    #[tokio::test]
    async fn test_reput_same_value_keeps_one_entry() {
        let store = MemoryStore::new();
        store.put("k", "v").await.unwrap();
        store.put("k", "v").await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.put("k", "v").await.unwrap();
        assert!(handle.contains_key("k"));
    }
}
