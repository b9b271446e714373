//! Error to response mapping.
//!
//! # Design Decisions
//! - Parse failures report the front-end's messages verbatim, joined by ","
//! - Store and front-end transport failures get a fixed body; details go to
//!   the log only
//! - Route misses are not errors; they are `MockResponse::NotFound`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::frontend::adapter::UNREADABLE_MESSAGE;
use crate::frontend::ParseFailure;
use crate::store::StoreError;

/// Any failure while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// A submitted specification did not parse.
    #[error("specification rejected: {0}")]
    Submission(ParseFailure),

    /// The text stored for a tenant did not parse.
    #[error("stored specification unreadable: {0}")]
    StoredSpec(ParseFailure),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::Submission(_) | ServeError::StoredSpec(_) | ServeError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServeError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServeError::Body(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            ServeError::Submission(_) => "submission_rejected",
            ServeError::StoredSpec(_) => "stored_spec_invalid",
            ServeError::Storage(_) => "storage_unavailable",
            ServeError::PayloadTooLarge { .. } => "payload_too_large",
            ServeError::Body(_) => "bad_body",
        }
    }

    fn body(&self) -> String {
        match self {
            ServeError::Submission(failure) | ServeError::StoredSpec(failure) => match failure {
                ParseFailure::Rejected(messages) => messages.join(","),
                ParseFailure::Unreadable => UNREADABLE_MESSAGE.to_string(),
                ParseFailure::Unavailable(_) => "Front-end unavailable".to_string(),
            },
            ServeError::Storage(_) => "Storage unavailable".to_string(),
            ServeError::PayloadTooLarge { .. } => "Payload too large".to_string(),
            ServeError::Body(_) => "Unreadable request body".to_string(),
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::FrontEndError;
    use http_body_util::BodyExt;

    async fn body_text(err: ServeError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_rejected_messages_joined() {
        let err = ServeError::Submission(ParseFailure::Rejected(vec![
            "Expected identifier".into(),
            "Unexpected EOF".into(),
        ]));
        assert_eq!(
            body_text(err).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Expected identifier,Unexpected EOF".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_unreadable_fixed_message() {
        let err = ServeError::Submission(ParseFailure::Unreadable);
        assert_eq!(
            body_text(err).await,
            (StatusCode::INTERNAL_SERVER_ERROR, "Cannot read wirespec".to_string())
        );
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let err = ServeError::StoredSpec(ParseFailure::Unavailable(FrontEndError::Exit {
            status: "exit status: 2".into(),
            stderr: "secret stack trace".into(),
        }));
        let (status, body) = body_text(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Front-end unavailable");

        let err = ServeError::Storage(StoreError::Unavailable("db down".into()));
        assert_eq!(body_text(err).await.1, "Storage unavailable");
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = ServeError::PayloadTooLarge { limit: 10 };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.outcome(), "payload_too_large");
    }
}
