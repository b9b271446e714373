//! Content-addressable specification storage.
//!
//! # Data Flow
//! ```text
//! Submission (unknown tenant):
//!     request body
//!     → digest.rs (SHA-1 hex of raw text)
//!     → gateway.rs store(digest, text)
//!     → BlobStore::put
//!
//! Lookup (every request):
//!     host label (tenant id)
//!     → gateway.rs fetch_by_tenant(id)
//!     → BlobStore::get → Some(text) | None
//! ```
//!
//! # Design Decisions
//! - The blob store is injected, never a process-wide global
//! - Absence is a normal outcome (`Ok(None)`), not an error
//! - No retry or backoff: store failures surface for the current request
//! - Tenant ids and digests share one flat key namespace

pub mod digest;
pub mod file;
pub mod gateway;
pub mod memory;

use async_trait::async_trait;

pub use digest::ContentDigest;
pub use file::FileStore;
pub use gateway::{SpecStore, SpecText};
pub use memory::MemoryStore;

/// Errors raised by a blob store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key-value contract of the external blob store.
///
/// `put` on an existing key overwrites it. Callers only ever re-put a key
/// with identical content, so overwrite is a no-op in effect.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Fetch the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
