//! Text generation handler: forwards a story prompt to the configured model.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use charforge_ollama::{ChatTurn, OllamaClient};
use tracing::{error, info};

use crate::dto::{StoryRequest, StoryResponse};
use crate::error::AppError;
use crate::RelayConfig;

/// Generates text from a prompt, optionally grounded in prior story context.
pub async fn generate_story(
    State(config): State<Arc<RelayConfig>>,
    Json(req): Json<StoryRequest>,
) -> Result<Json<StoryResponse>, AppError> {
    info!("Generating text with model: {} at {}", req.model, req.ollama_url);

    let message = build_story_message(&req.context, &req.prompt);

    let client = OllamaClient::new(&req.ollama_url, config.timeout);
    let reply = client
        .chat(&req.model, &[ChatTurn::user(message)])
        .await
        .map_err(|e| {
            error!("Text generation failed: {}", e);
            AppError::Internal(format!(
                "Text generation failed: {e}. Ensure Ollama is running and the model '{}' is available.",
                req.model
            ))
        })?;

    info!("Text generation complete");

    Ok(Json(StoryResponse {
        status: "success",
        text: reply.trim().to_string(),
    }))
}

/// Merges prior context into the instruction when present. Inputs are sent
/// as-is; only the daemon's reply gets trimmed, never the prompt.
fn build_story_message(context: &str, prompt: &str) -> String {
    if context.trim().is_empty() {
        prompt.to_string()
    } else {
        format!("Context:\n{context}\n\nInstruction:\n{prompt}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_context_passes_prompt_through() {
        assert_eq!(build_story_message("", "write a scene"), "write a scene");
        assert_eq!(build_story_message("  \n\t", "write a scene"), "write a scene");
    }

    #[test]
    fn context_is_merged_without_altering_either_input() {
        let merged = build_story_message("The hero is tired.\n", "Continue. ");
        assert_eq!(merged, "Context:\nThe hero is tired.\n\n\nInstruction:\nContinue. ");
    }
}
