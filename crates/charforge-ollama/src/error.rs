use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to the Ollama daemon.
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("connection failed: {0}")]
    Unreachable(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected response from Ollama: {0}")]
    BadResponse(String),
}
