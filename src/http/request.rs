//! Request inspection.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4)
//! - Extract the tenant identifier from the request host
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The tenant is the first dot-delimited host label, used verbatim
//! - The URI authority (HTTP/2, absolute-form) wins over the Host header

use axum::http::uri::Authority;
use axum::http::{header, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates `x-request-id` values for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// Access to the request ID header.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Hostname without port, from the URI authority or the Host header.
fn hostname<B>(req: &Request<B>) -> Option<String> {
    if let Some(host) = req.uri().host() {
        return Some(host.to_string());
    }

    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.parse::<Authority>().ok())
        .map(|a| a.host().to_string())
}

/// Tenant identifier of a request: the first label of its hostname.
///
/// Empty when the request carries no usable host.
pub fn tenant_id<B>(req: &Request<B>) -> String {
    hostname(req)
        .and_then(|host| host.split('.').next().map(str::to_string))
        .unwrap_or_default()
}
