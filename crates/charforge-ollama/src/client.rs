use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::OllamaError;

/// Default address of a locally-running Ollama daemon.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// A single chat message sent to the daemon, optionally carrying images.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
    pub images: Vec<Vec<u8>>,
}

impl ChatTurn {
    /// Creates a user-role turn with the given content.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// Attaches raw image bytes; they are base64-encoded on the wire.
    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.images.push(bytes);
        self
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

impl From<&ChatTurn> for OllamaMessage {
    fn from(turn: &ChatTurn) -> Self {
        let images = if turn.images.is_empty() {
            None
        } else {
            Some(turn.images.iter().map(|b| BASE64.encode(b)).collect())
        };
        OllamaMessage {
            role: turn.role.clone(),
            content: turn.content.clone(),
            images,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

/// Client for Ollama's native /api/chat endpoint.
///
/// Each request carries a bounded timeout; a hung daemon surfaces as
/// [`OllamaError::Timeout`] instead of blocking the caller indefinitely.
pub struct OllamaClient {
    client: Client,
    api_base: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Creates a client for the daemon at `host` with the given request timeout.
    pub fn new(host: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_base: host.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Sends a non-streaming chat request and returns the reply content.
    pub async fn chat(&self, model: &str, turns: &[ChatTurn]) -> Result<String, OllamaError> {
        let url = format!("{}/api/chat", self.api_base);

        let request = OllamaChatRequest {
            model: model.to_string(),
            messages: turns.iter().map(OllamaMessage::from).collect(),
            stream: false,
        };

        debug!("POST {} (model: {})", url, model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::BadResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let resp: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::BadResponse(e.to_string()))?;

        Ok(resp.message.map(|m| m.content).unwrap_or_default())
    }

    fn map_send_error(&self, e: reqwest::Error) -> OllamaError {
        if e.is_timeout() {
            OllamaError::Timeout(self.timeout)
        } else {
            OllamaError::Unreachable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_turn_omits_images_field() {
        let turn = ChatTurn::user("hello");
        let msg = OllamaMessage::from(&turn);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
        assert!(json.get("images").is_none());
    }

    #[test]
    fn image_turn_encodes_bytes_as_base64() {
        let turn = ChatTurn::user("describe").with_image(vec![0x89, 0x50, 0x4e, 0x47]);
        let msg = OllamaMessage::from(&turn);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["images"][0], BASE64.encode([0x89, 0x50, 0x4e, 0x47]));
    }

    #[test]
    fn missing_message_yields_empty_content() {
        let resp: OllamaChatResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert_eq!(resp.message.map(|m| m.content).unwrap_or_default(), "");
    }

    #[test]
    fn trailing_slash_in_host_is_trimmed() {
        let client = OllamaClient::new("http://127.0.0.1:11434/", Duration::from_secs(5));
        assert_eq!(client.api_base, "http://127.0.0.1:11434");
    }

    #[test]
    fn sub_second_timeout_is_kept_as_is() {
        let client = OllamaClient::new("http://127.0.0.1:11434", Duration::from_millis(500));
        assert_eq!(client.timeout, Duration::from_millis(500));
    }

    #[test]
    fn timeout_error_names_the_configured_bound() {
        let err = OllamaError::Timeout(Duration::from_millis(500));
        assert_eq!(err.to_string(), "request timed out after 500ms");
    }
}
