//! Adapter over the external front-end.
//!
//! # Responsibilities
//! - Turn a raw [`ParseResult`] into `Ast` or a typed failure
//! - Turn a raw [`GenerateResult`] into JSON that is always valid
//!
//! # Design Decisions
//! - Errors win over a result; a result alone is success, even when empty
//! - Neither side present is its own failure, not an assumption violation
//! - Generation never fails outward: the fallback is an empty object

use serde_json::Value;
use std::sync::Arc;

use crate::frontend::{Ast, Diagnostic, FrontEndError, LanguageFrontEnd};
use crate::observability::metrics;

/// Fixed message for a front-end that returned neither a result nor errors.
pub const UNREADABLE_MESSAGE: &str = "Cannot read wirespec";

/// Why a specification could not be turned into an [`Ast`].
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    /// The front-end reported structural errors.
    #[error("{}", .0.join(","))]
    Rejected(Vec<String>),

    #[error("{}", UNREADABLE_MESSAGE)]
    Unreadable,

    #[error(transparent)]
    Unavailable(#[from] FrontEndError),
}

/// Normalizing wrapper around a [`LanguageFrontEnd`].
#[derive(Clone)]
pub struct SpecFrontEnd {
    inner: Arc<dyn LanguageFrontEnd>,
}

impl SpecFrontEnd {
    pub fn new(inner: Arc<dyn LanguageFrontEnd>) -> Self {
        Self { inner }
    }

    /// Parse a specification.
    pub async fn parse(&self, text: &str) -> Result<Ast, ParseFailure> {
        let raw = self.inner.parse(text).await?;

        match (raw.result, raw.errors) {
            (_, Some(errors)) if !errors.is_empty() => {
                Err(ParseFailure::Rejected(messages(errors)))
            }
            (Some(ast), _) => Ok(ast),
            (None, _) => Err(ParseFailure::Unreadable),
        }
    }

    /// Generate a mock value for `type_ref` within `text`.
    ///
    /// Returns `{}` when the front-end fails in any way.
    pub async fn generate(&self, text: &str, type_ref: &str) -> Value {
        let raw = match self.inner.generate(text, type_ref).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(type_ref = %type_ref, error = %e, "Front-end generate call failed");
                return fallback();
            }
        };

        if let Some(errors) = raw.errors.filter(|e| !e.is_empty()) {
            tracing::warn!(
                type_ref = %type_ref,
                errors = %messages(errors).join(","),
                "Mock generation reported errors"
            );
            return fallback();
        }

        let Some(json) = raw.result else {
            tracing::warn!(type_ref = %type_ref, "Mock generation returned no result");
            return fallback();
        };

        match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(type_ref = %type_ref, error = %e, "Mock generation returned invalid JSON");
                fallback()
            }
        }
    }
}

impl std::fmt::Debug for SpecFrontEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecFrontEnd").finish_non_exhaustive()
    }
}

fn messages(errors: Vec<Diagnostic>) -> Vec<String> {
    errors.into_iter().map(|d| d.value).collect()
}

fn fallback() -> Value {
    metrics::record_generation_fallback();
    Value::Object(serde_json::Map::new())
}
