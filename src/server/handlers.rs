//! Route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::engine::{AudioUpload, GenerateError, GenerationRequest, VoiceCloner};
use crate::model::{Device, VoiceModel};

use super::error::ApiError;

/// File name of the generated attachment.
pub const ATTACHMENT_NAME: &str = "generated_voice.wav";

/// Shared handler state.
pub struct AppState<M: VoiceModel> {
    pub cloner: Arc<VoiceCloner<M>>,
}

impl<M: VoiceModel> AppState<M> {
    pub fn new(cloner: Arc<VoiceCloner<M>>) -> Self {
        Self { cloner }
    }
}

impl<M: VoiceModel> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            cloner: Arc::clone(&self.cloner),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub device: Device,
}

/// Server configuration response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigResponse {
    pub device: Device,
    pub model: String,
    pub max_text_length: usize,
    pub audio_format: String,
    pub sample_duration: u32,
}

pub async fn health<M: VoiceModel + 'static>(State(state): State<AppState<M>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        device: state.cloner.model().device(),
    })
}

pub async fn config<M: VoiceModel + 'static>(State(state): State<AppState<M>>) -> Json<ConfigResponse> {
    let model = state.cloner.model();
    let limits = state.cloner.limits();

    Json(ConfigResponse {
        device: model.device(),
        model: model.name(),
        max_text_length: limits.max_text_length,
        audio_format: "wav".to_string(),
        sample_duration: limits.sample_duration,
    })
}

/// Clone the uploaded voice onto the submitted text.
///
/// Synthesis blocks, so it runs on the blocking pool.
pub async fn generate<M: VoiceModel + 'static>(
    State(state): State<AppState<M>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|e| GenerateError::MalformedRequest(e.body_text()))?;
    let request = read_generation_request(multipart).await?;

    let cloner = Arc::clone(&state.cloner);
    let wav = tokio::task::spawn_blocking(move || cloner.generate(&request))
        .await
        .map_err(|e| GenerateError::Worker(e.to_string()))??;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ATTACHMENT_NAME}\""),
            ),
        ],
        wav,
    )
        .into_response())
}

/// Collect the `audio` file part and `text` field from the form.
///
/// A part named `audio` without a filename is a plain field, not an upload,
/// and does not count as audio.
async fn read_generation_request(mut multipart: Multipart) -> Result<GenerationRequest, GenerateError> {
    let mut request = GenerationRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GenerateError::MalformedRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| GenerateError::MalformedRequest(e.body_text()))?;
                request.audio = Some(AudioUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "text" => {
                request.text = field
                    .text()
                    .await
                    .map_err(|e| GenerateError::MalformedRequest(e.body_text()))?;
            }
            _ => {}
        }
    }

    Ok(request)
}
