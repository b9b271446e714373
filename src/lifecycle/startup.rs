//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured specification store
//! - Build the front-end transport
//! - Assemble the HTTP server around both

use std::sync::Arc;

use crate::config::{ServeConfig, StoreBackend};
use crate::frontend::ProcessFrontEnd;
use crate::http::HttpServer;
use crate::store::{BlobStore, FileStore, MemoryStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("file store backend requires store.path")]
    MissingStorePath,

    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),
}

/// Open the blob store selected by `config.store`.
pub async fn open_store(config: &ServeConfig) -> Result<Arc<dyn BlobStore>, StartupError> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; specifications are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::File => {
            let path = config
                .store
                .path
                .clone()
                .ok_or(StartupError::MissingStorePath)?;
            Ok(Arc::new(FileStore::open(path).await?))
        }
    }
}

/// Build a server wired to the configured store and front-end.
pub async fn build_server(config: ServeConfig) -> Result<HttpServer, StartupError> {
    let store = open_store(&config).await?;
    let front_end = Arc::new(ProcessFrontEnd::from_config(&config.front_end));

    tracing::info!(
        backend = ?config.store.backend,
        front_end = %config.front_end.command,
        "Subsystems initialized"
    );

    Ok(HttpServer::new(config, store, front_end))
}
