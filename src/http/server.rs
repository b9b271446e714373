//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with a single catch-all handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve the tenant and either accept a submission or serve a mock
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http_body_util::LengthLimitError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServeConfig;
use crate::frontend::{LanguageFrontEnd, ParseFailure, SpecFrontEnd};
use crate::http::request::{tenant_id, MakeRequestUuid, RequestIdExt};
use crate::http::response::ServeError;
use crate::lifecycle::shutdown;
use crate::mock::{MockResolver, MockResponse};
use crate::observability::metrics;
use crate::routing::{Dispatcher, RouteTable};
use crate::store::{BlobStore, ContentDigest, SpecStore};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: SpecStore,
    pub front_end: SpecFrontEnd,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BlobStore>,
        front_end: Arc<dyn LanguageFrontEnd>,
        max_body_size: usize,
    ) -> Self {
        Self {
            store: SpecStore::new(store),
            front_end: SpecFrontEnd::new(front_end),
            max_body_size,
        }
    }

    /// Accept a new specification and return its digest.
    ///
    /// The text is parsed trimmed but hashed and stored exactly as received.
    pub async fn submit(&self, text: String) -> Result<ContentDigest, ServeError> {
        let ast = match self.front_end.parse(text.trim()).await {
            Ok(ast) => ast,
            Err(failure) => {
                metrics::record_submission(match failure {
                    ParseFailure::Rejected(_) => "rejected",
                    ParseFailure::Unreadable => "unreadable",
                    ParseFailure::Unavailable(_) => "unavailable",
                });
                return Err(ServeError::Submission(failure));
            }
        };

        let digest = ContentDigest::of(&text);
        self.store.store(&digest, &text).await?;
        metrics::record_submission("accepted");
        tracing::info!(digest = %digest, definitions = ast.len(), "Specification accepted");
        Ok(digest)
    }

    /// Serve `method` + `path` from a stored specification.
    pub async fn serve(
        &self,
        spec_text: &str,
        method: &Method,
        path: &str,
    ) -> Result<MockResponse, ServeError> {
        let ast = self
            .front_end
            .parse(spec_text)
            .await
            .map_err(ServeError::StoredSpec)?;

        let dispatcher = Dispatcher::new(
            RouteTable::build(&ast),
            MockResolver::new(&self.front_end, spec_text),
        );
        Ok(dispatcher.dispatch(method, path).await)
    }
}

/// HTTP server for the specification mocks.
pub struct HttpServer {
    router: Router,
    config: ServeConfig,
}

impl HttpServer {
    /// Create a new HTTP server around the given store and front-end.
    pub fn new(
        config: ServeConfig,
        store: Arc<dyn BlobStore>,
        front_end: Arc<dyn LanguageFrontEnd>,
    ) -> Self {
        let state = AppState::new(store, front_end, config.limits.max_body_size);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServeConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %request.request_id(),
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                }),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id());

        Router::new()
            .route("/{*path}", any(serve_handler))
            .route("/", any(serve_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// The fully layered router, e.g. for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServeConfig {
        &self.config
    }
}

/// What a successful request produced.
enum Served {
    Submitted(ContentDigest),
    Mock(MockResponse),
}

impl Served {
    fn outcome(&self) -> &'static str {
        match self {
            Served::Submitted(_) => "submitted",
            Served::Mock(mock) => mock.outcome(),
        }
    }
}

impl IntoResponse for Served {
    fn into_response(self) -> Response {
        match self {
            Served::Submitted(digest) => digest.into_string().into_response(),
            Served::Mock(mock) => mock.into_response(),
        }
    }
}

/// Catch-all handler: every method, every path, every host.
async fn serve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let tenant = tenant_id(&request);

    let (outcome, response) = match handle(&state, &tenant, request).await {
        Ok(served) => (served.outcome(), served.into_response()),
        Err(e) => {
            tracing::warn!(tenant = %tenant, error = %e, "Request failed");
            (e.outcome(), e.into_response())
        }
    };

    tracing::debug!(tenant = %tenant, outcome, status = %response.status(), "Request served");
    metrics::record_request(outcome, response.status().as_u16(), start);
    response
}

async fn handle(state: &AppState, tenant: &str, request: Request<Body>) -> Result<Served, ServeError> {
    match state.store.fetch_by_tenant(tenant).await? {
        None => {
            let text = read_body(request.into_body(), state.max_body_size).await?;
            state.submit(text).await.map(Served::Submitted)
        }
        Some(spec_text) => {
            // Body is not Sync; keep only owned parts across awaits.
            let method = request.method().clone();
            let path = request.uri().path().to_string();
            drop(request);

            let mock = state.serve(&spec_text, &method, &path).await?;
            Ok(Served::Mock(mock))
        }
    }
}

/// Read the whole body as text, replacing invalid UTF-8.
async fn read_body(body: Body, limit: usize) -> Result<String, ServeError> {
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if is_length_limit(&e) => Err(ServeError::PayloadTooLarge { limit }),
        Err(e) => Err(ServeError::Body(e)),
    }
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
