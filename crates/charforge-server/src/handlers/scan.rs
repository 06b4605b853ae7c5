//! Image analysis handler: forwards a character portrait to a vision model.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use charforge_ollama::{ChatTurn, OllamaClient, DEFAULT_OLLAMA_URL};
use tracing::{error, info};

use crate::dto::ScanResponse;
use crate::error::AppError;
use crate::RelayConfig;

const VISION_PROMPT: &str = "Describe this character in a comma-separated list of visual \
keywords optimized for Stable Diffusion. Focus on: hair style/color, eye color, facial \
features, scars, and expression.";

const DEFAULT_VISION_MODEL: &str = "llava";

/// Analyzes an uploaded character image and returns suggested keywords.
///
/// Unlike text generation, daemon failures here never become HTTP errors:
/// the frontend shows the message inline, so the response is always 200
/// with `status` distinguishing success from failure.
pub async fn scan_face(
    State(config): State<Arc<RelayConfig>>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, AppError> {
    let mut image: Option<Vec<u8>> = None;
    let mut ollama_url = DEFAULT_OLLAMA_URL.to_string();
    let mut vision_model = DEFAULT_VISION_MODEL.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if let Some(filename) = field.file_name() {
                    info!("Received file: {}", filename);
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
                image = Some(bytes.to_vec());
            }
            "ollama_url" => {
                ollama_url = field
                    .text()
                    .await
                    .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
            }
            "vision_model" => {
                vision_model = field
                    .text()
                    .await
                    .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
            }
            _ => {}
        }
    }

    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::UnprocessableEntity("field 'file' is required".to_string()))?;

    info!("Connecting to Ollama at {}...", ollama_url);

    let client = OllamaClient::new(&ollama_url, config.timeout);
    let turn = ChatTurn::user(VISION_PROMPT).with_image(image);

    match client.chat(&vision_model, &[turn]).await {
        Ok(description) => {
            info!("Analysis complete: {}", description);
            Ok(Json(ScanResponse {
                status: "success",
                suggested_keywords: description,
            }))
        }
        Err(e) => {
            error!("Image analysis failed: {}", e);
            Ok(Json(ScanResponse {
                status: "error",
                suggested_keywords: format!("Connection Error: {e}. Ensure Ollama is running."),
            }))
        }
    }
}
