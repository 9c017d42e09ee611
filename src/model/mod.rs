//! The pretrained voice-cloning model.
//!
//! Synthesis itself happens in an external inference backend; this module
//! defines the seam the rest of the crate talks to and the HTTP client that
//! implements it.

mod client;
#[cfg(test)]
pub(crate) mod fake_backend;
mod types;

pub use client::{DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT, HttpVoiceModel};
pub use types::{BackendHealth, DEFAULT_MODEL_NAME, DEFAULT_SAMPLE_RATE, Device, ModelError};

use std::path::Path;

use crate::audio::Waveform;

/// Trait for a loaded voice-cloning model.
///
/// A handle is created once at startup and only read afterwards, so it must
/// be shareable across request threads. Tests substitute mock implementations.
#[cfg_attr(test, mockall::automock)]
pub trait VoiceModel: Send + Sync {
    /// Device the model was loaded on. Never `Device::Auto`.
    fn device(&self) -> Device;

    /// Human-readable model name.
    fn name(&self) -> String;

    /// Native output sample rate.
    fn sample_rate(&self) -> u32;

    /// Synthesize `text` in the voice of the reference clip.
    ///
    /// # Arguments
    /// * `text` - Text to speak
    /// * `audio_prompt_path` - WAV file holding the reference voice
    fn generate(&self, text: &str, audio_prompt_path: &Path) -> Result<Waveform, ModelError>;
}
