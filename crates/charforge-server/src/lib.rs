//! HTTP relay between the character-creator frontend and an Ollama daemon.
//!
//! Exposes two endpoints: `/scan-face` (vision-model image analysis) and
//! `/generate-story` (text generation). Router construction lives here so
//! integration tests can drive it without binding a socket.

mod config;
mod dto;
mod error;
mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::RelayConfig;

/// Builds the relay router with CORS and request tracing applied.
pub fn build_router(config: RelayConfig) -> Router {
    // Credentials are allowed, so methods/headers mirror the request
    // instead of using the wildcard (which tower-http rejects).
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/scan-face", post(handlers::scan::scan_face))
        .route("/generate-story", post(handlers::story::generate_story))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(config))
}
