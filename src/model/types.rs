//! Model request/response types.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::AudioError;

/// Name reported for the pretrained voice-cloning model.
pub const DEFAULT_MODEL_NAME: &str = "ChatterboxTurboTTS";

/// Native output rate of the model when the backend does not report one.
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Errors that can occur when loading or running the voice model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Device not available: {0}")]
    DeviceUnavailable(String),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compute device the model runs on.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Accelerator if available, else CPU
    #[default]
    Auto,

    /// General-purpose CPU
    Cpu,

    /// CUDA accelerator
    Cuda,
}

impl Device {
    /// Returns the device identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Auto => "auto",
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
        }
    }

    /// Resolve `Auto` against the accelerator availability.
    pub fn resolve(self, accelerator_available: bool) -> Result<Device, ModelError> {
        match self {
            Device::Auto if accelerator_available => Ok(Device::Cuda),
            Device::Auto => Ok(Device::Cpu),
            Device::Cuda if !accelerator_available => Err(ModelError::DeviceUnavailable(
                "CUDA requested but the backend reports no accelerator".to_string(),
            )),
            other => Ok(other),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health check response from the inference backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    pub model: String,
    pub cuda_available: bool,
    pub gpu: Option<String>,
    pub device: String,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}
