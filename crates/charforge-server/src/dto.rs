//! Data transfer objects for HTTP message serialization.

use charforge_ollama::DEFAULT_OLLAMA_URL;
use serde::{Deserialize, Serialize};

/// Request body for text generation.
#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub prompt: String,
    #[serde(default)]
    pub context: String,
    #[serde(default = "default_story_model")]
    pub model: String,
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
}

fn default_story_model() -> String {
    "dolphin-mistral:7b".to_string()
}

fn default_ollama_url() -> String {
    DEFAULT_OLLAMA_URL.to_string()
}

/// Response from text generation.
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub status: &'static str,
    pub text: String,
}

/// Response from image analysis. Always paired with HTTP 200; failures are
/// reported through `status: "error"` for frontend compatibility.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: &'static str,
    pub suggested_keywords: String,
}
