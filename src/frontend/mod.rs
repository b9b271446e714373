//! Specification language front-end.
//!
//! # Data Flow
//! ```text
//! specification text
//!     → LanguageFrontEnd::parse      (external collaborator)
//!     → adapter.rs normalizes        → Ast | ParseFailure
//!
//! (specification text, "Todo[]")
//!     → LanguageFrontEnd::generate   (external collaborator)
//!     → adapter.rs normalizes        → JSON value, `{}` on any failure
//! ```
//!
//! # Design Decisions
//! - The grammar and the value generator live outside this crate; only
//!   their result shapes are modelled here
//! - `process.rs` provides a transport to an out-of-process front-end
//!   speaking JSON on stdout

pub mod adapter;
pub mod ast;
pub mod process;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use adapter::{ParseFailure, SpecFrontEnd};
pub use ast::{Ast, Definition, Endpoint, Reference, ResponseClause, Segment};
pub use process::ProcessFrontEnd;

/// A message reported by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub value: String,
}

impl Diagnostic {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// Raw outcome of a parse call. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    #[serde(default)]
    pub result: Option<Ast>,
    #[serde(default)]
    pub errors: Option<Vec<Diagnostic>>,
}

/// Raw outcome of a generate call; `result` is JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResult {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<Diagnostic>>,
}

/// Failure to talk to the front-end at all.
#[derive(Debug, thiserror::Error)]
pub enum FrontEndError {
    #[error("failed to run front-end: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("front-end exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("malformed front-end output: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The external language front-end.
#[async_trait]
pub trait LanguageFrontEnd: Send + Sync + 'static {
    async fn parse(&self, text: &str) -> Result<ParseResult, FrontEndError>;

    /// Generate a mock value of `type_ref` (e.g. `Todo` or `Todo[]`).
    async fn generate(&self, text: &str, type_ref: &str) -> Result<GenerateResult, FrontEndError>;
}
