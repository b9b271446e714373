//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Ast (per request)
//!     → table.rs (endpoint definitions → per-method pattern tables)
//!
//! Incoming Request (method, path)
//!     → dispatcher.rs (table lookup, bind path params)
//!     → select "200" response clause
//!     → mock::MockResolver
//!     → Return: JSON mock or NotFound
//! ```
//!
//! # Design Decisions
//! - Tables are built per request from the freshly parsed Ast, never cached
//! - One table slot per HTTP method (closed enum, no string-keyed map)
//! - Deterministic: the first matching definition in document order wins,
//!   even over a more specific later pattern
//! - Unmatched requests fall through to NotFound

pub mod dispatcher;
pub mod method;
pub mod table;

pub use dispatcher::{Dispatch, Dispatcher};
pub use method::HttpMethod;
pub use table::{build_pattern, PathParams, RouteEntry, RouteMatch, RouteTable};
