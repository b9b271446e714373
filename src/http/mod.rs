//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tenant label from Host)
//!     → store gateway lookup
//!         absent  → submission: parse, digest, store → 200 digest
//!         present → parse, route table, dispatch → mock JSON | 404
//!     → response.rs (error → status/body mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{tenant_id, MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use response::ServeError;
pub use server::{AppState, HttpServer};
