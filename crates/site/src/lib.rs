//! Creatorum site library.
//!
//! The landing page, waitlist modal and admin dashboard, served as
//! server-rendered pages in front of the waitlist backend API. Exposed as a
//! library so the binary and the integration tests build the same router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, header::CACHE_CONTROL},
    middleware::from_fn,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span, field};

use crate::state::AppState;

/// Cache policy for CSS, JS and images under `/static`.
const STATIC_CACHE_CONTROL: &str = "public, max-age=3600";

/// Build the full application router.
///
/// Sentry layers are added by the binary, outside this router, so tests
/// can use it without a Sentry client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(STATIC_CACHE_CONTROL),
        ))
        .service(ServeDir::new(&state.config().static_dir));

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_files)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Span for one request; `request_id` is filled in by the request ID middleware.
fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = field::Empty,
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The backend is not probed.
async fn health() -> &'static str {
    "ok"
}
