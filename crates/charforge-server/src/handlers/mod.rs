//! HTTP route handlers for the relay server.

pub mod scan;
pub mod story;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
