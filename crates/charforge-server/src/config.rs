//! Server configuration loaded from the environment at startup.

use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;

/// The local development UI origin allowed by default.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3001";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Immutable relay configuration shared by all handlers.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: String,
    /// Single origin allowed by the CORS layer.
    pub cors_origin: HeaderValue,
    /// Upper bound on each downstream Ollama call.
    pub timeout: Duration,
}

impl RelayConfig {
    /// Reads configuration from the environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("CHARFORGE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let origin =
            std::env::var("CHARFORGE_CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid CHARFORGE_CORS_ORIGIN: {origin}"))?;

        let timeout_secs = match std::env::var("CHARFORGE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid CHARFORGE_TIMEOUT_SECS: {raw}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            cors_origin,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_dev_setup() {
        let config = RelayConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.cors_origin, "http://localhost:3001");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }
}
