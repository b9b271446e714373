//! Specification-driven mock server.
//!
//! Serves many independent wirespec specifications from one process. The
//! first label of the request host selects a stored specification; requests
//! for an unknown label submit their body as a new specification, stored
//! under the SHA-1 digest of its text.

// Core subsystems
pub mod config;
pub mod frontend;
pub mod http;
pub mod mock;
pub mod routing;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServeConfig;
pub use frontend::{LanguageFrontEnd, SpecFrontEnd};
pub use http::HttpServer;
pub use lifecycle::shutdown::Shutdown;
pub use store::{BlobStore, ContentDigest, SpecStore};
