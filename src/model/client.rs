//! HTTP client for the inference backend hosting the pretrained model.

use std::path::Path;

use tracing::{debug, info};

use crate::audio::{Waveform, decode_wav};

use super::VoiceModel;
use super::types::{BackendHealth, DEFAULT_MODEL_NAME, Device, ModelError};

/// Default inference backend host.
pub const DEFAULT_BACKEND_HOST: &str = "localhost";

/// Default inference backend port.
pub const DEFAULT_BACKEND_PORT: u16 = 9300;

/// Voice model served by a remote inference backend.
pub struct HttpVoiceModel {
    base_url: String,
    client: reqwest::blocking::Client,
    device: Device,
    sample_rate: u32,
}

impl HttpVoiceModel {
    /// Build the backend base URL.
    pub fn base_url_for(host: &str, port: u16) -> String {
        format!("http://{host}:{port}")
    }

    /// Load the pretrained model on the given device.
    ///
    /// Queries the backend once; `Device::Auto` resolves to CUDA when the
    /// backend reports an accelerator.
    pub fn from_pretrained(device: Device, host: &str, port: u16) -> Result<Self, ModelError> {
        let base_url = Self::base_url_for(host, port);
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| ModelError::ConnectionFailed(e.to_string()))?;

        let health = fetch_health(&client, &base_url)?;
        let device = device.resolve(health.cuda_available)?;

        info!(
            backend = %base_url,
            backend_model = %health.model,
            device = %device,
            gpu = health.gpu.as_deref().unwrap_or("none"),
            sample_rate = health.sample_rate,
            "Voice model ready"
        );

        Ok(Self {
            base_url,
            client,
            device,
            sample_rate: health.sample_rate,
        })
    }
}

fn fetch_health(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> Result<BackendHealth, ModelError> {
    let url = format!("{base_url}/health");

    let response = client
        .get(&url)
        .send()
        .map_err(|e| ModelError::ConnectionFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ModelError::RequestFailed(format!(
            "Status: {}",
            response.status()
        )));
    }

    response
        .json()
        .map_err(|e| ModelError::InvalidResponse(e.to_string()))
}

impl VoiceModel for HttpVoiceModel {
    fn device(&self) -> Device {
        self.device
    }

    /// Always the pretrained model's name; the backend's own label is only logged.
    fn name(&self) -> String {
        DEFAULT_MODEL_NAME.to_string()
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn generate(&self, text: &str, audio_prompt_path: &Path) -> Result<Waveform, ModelError> {
        let url = format!("{}/generate", self.base_url);

        let audio_data = std::fs::read(audio_prompt_path)?;

        let file_name = audio_prompt_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav");

        let file_part = reqwest::blocking::multipart::Part::bytes(audio_data)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        let form = reqwest::blocking::multipart::Form::new()
            .part("audio", file_part)
            .text("text", text.to_string())
            .text("device", self.device.as_str());

        debug!(url = %url, text_len = text.len(), "Calling inference backend");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ModelError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ModelError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        Ok(decode_wav(&bytes)?)
    }
}
