//! Mock response synthesis.
//!
//! A matched endpoint's "200" clause names a type; the front-end generates
//! a value of it and the value is served as JSON. Nothing is cached, so a
//! mock always reflects the stored specification seen by the request.

pub mod resolver;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

pub use resolver::{generation_target, MockResolver};

/// Content type of every served mock body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Why a known tenant's request produced no mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No route for method + path.
    NoRoute,
    /// The endpoint declares no "200" clause.
    NoSuccessClause,
    /// The "200" clause has no content or references a non-custom type.
    NoMockType,
}

impl NotFoundReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            NotFoundReason::NoRoute => "no_route",
            NotFoundReason::NoSuccessClause => "no_success_clause",
            NotFoundReason::NoMockType => "no_mock_type",
        }
    }
}

/// Outcome of serving a request for a known tenant.
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    Json(Value),
    NotFound(NotFoundReason),
}

impl MockResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            MockResponse::Json(_) => StatusCode::OK,
            MockResponse::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            MockResponse::Json(_) => "mock",
            MockResponse::NotFound(reason) => reason.as_str(),
        }
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        match self {
            MockResponse::Json(value) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                value.to_string(),
            )
                .into_response(),
            MockResponse::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
