//! Specification store gateway.
//!
//! Thin contract over the injected [`BlobStore`]: tenant lookups and
//! digest-keyed writes.

use std::sync::Arc;

use crate::store::{BlobStore, ContentDigest, StoreError};

/// Raw specification text as submitted or fetched. Never mutated.
pub type SpecText = String;

/// Gateway between the request path and the blob store.
#[derive(Clone)]
pub struct SpecStore {
    inner: Arc<dyn BlobStore>,
}

impl SpecStore {
    pub fn new(inner: Arc<dyn BlobStore>) -> Self {
        Self { inner }
    }

    /// Look up the specification served under a tenant identifier.
    ///
    /// A missing key is `Ok(None)`. An empty identifier never reaches the
    /// backing store.
    pub async fn fetch_by_tenant(&self, id: &str) -> Result<Option<SpecText>, StoreError> {
        if id.is_empty() {
            return Ok(None);
        }
        let text = self.inner.get(id).await?;
        tracing::debug!(tenant = %id, found = text.is_some(), "Tenant lookup");
        Ok(text)
    }

    /// Persist a specification under its content digest.
    ///
    /// Safe to repeat: the same digest always carries the same text.
    pub async fn store(&self, digest: &ContentDigest, text: &str) -> Result<(), StoreError> {
        self.inner.put(digest.as_str(), text).await?;
        tracing::info!(digest = %digest, bytes = text.len(), "Specification stored");
        Ok(())
    }
}

impl std::fmt::Debug for SpecStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecStore").finish_non_exhaustive()
    }
}
