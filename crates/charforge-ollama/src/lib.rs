//! Native Ollama API client for chat completions with image attachments.
//!
//! Uses Ollama's native /api/chat endpoint (not OpenAI-compatible) so that
//! vision models can receive base64-encoded images alongside the prompt.

mod client;
mod error;

pub use client::{ChatTurn, OllamaClient, DEFAULT_OLLAMA_URL};
pub use error::OllamaError;
