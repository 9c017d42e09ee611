//! Voice cloning request pipeline.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::audio::{AudioError, decode_wav, encode_wav};
use crate::model::{ModelError, VoiceModel};

/// Errors that can occur while handling a generation request.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("No audio file provided")]
    NoAudio,

    #[error("No text provided")]
    NoText,

    #[error("No audio file selected")]
    NoAudioSelected,

    #[error("Text exceeds maximum length of {0} characters")]
    TextTooLong(usize),

    #[error("Invalid audio file")]
    InvalidAudio(#[source] AudioError),

    #[error("Invalid multipart request")]
    MalformedRequest(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[source] AudioError),

    #[error("Worker failed: {0}")]
    Worker(String),
}

impl GenerateError {
    /// Whether the caller sent a bad request, as opposed to a server failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenerateError::NoAudio
                | GenerateError::NoText
                | GenerateError::NoAudioSelected
                | GenerateError::TextTooLong(_)
                | GenerateError::InvalidAudio(_)
                | GenerateError::MalformedRequest(_)
        )
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        if self.is_validation() {
            self.to_string()
        } else {
            "Failed to generate voice".to_string()
        }
    }
}

/// Limits applied to every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationLimits {
    /// Maximum text length in characters.
    pub max_text_length: usize,
    /// Longest reference clip handed to the model, in seconds.
    pub sample_duration: u32,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_text_length: 500,
            sample_duration: 10,
        }
    }
}

/// An uploaded reference clip.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A single voice generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub audio: Option<AudioUpload>,
    pub text: String,
}

impl GenerationRequest {
    /// Create a request with a reference clip.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, text: impl Into<String>) -> Self {
        Self {
            audio: Some(AudioUpload {
                file_name: file_name.into(),
                bytes,
            }),
            text: text.into(),
        }
    }
}

/// Runs generation requests against a loaded voice model.
pub struct VoiceCloner<M: VoiceModel> {
    model: M,
    limits: GenerationLimits,
    upload_dir: PathBuf,
}

impl<M: VoiceModel> VoiceCloner<M> {
    /// Create a cloner that stages reference clips in `upload_dir`.
    pub fn with_upload_dir(model: M, limits: GenerationLimits, upload_dir: PathBuf) -> Self {
        Self {
            model,
            limits,
            upload_dir,
        }
    }

    /// The loaded model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Limits applied to each request.
    pub fn limits(&self) -> GenerationLimits {
        self.limits
    }

    /// Check a request without touching the model.
    ///
    /// Order matters: missing audio, blank text, empty filename, then length.
    pub fn validate<'a>(&self, request: &'a GenerationRequest) -> Result<&'a AudioUpload, GenerateError> {
        let audio = request.audio.as_ref().ok_or(GenerateError::NoAudio)?;

        let text = request.text.trim();
        if text.is_empty() {
            return Err(GenerateError::NoText);
        }

        if audio.file_name.is_empty() {
            return Err(GenerateError::NoAudioSelected);
        }

        if text.chars().count() > self.limits.max_text_length {
            return Err(GenerateError::TextTooLong(self.limits.max_text_length));
        }

        Ok(audio)
    }

    /// Synthesize speech and return it as WAV bytes.
    ///
    /// The reference clip is staged in a uniquely named temporary file that
    /// is removed when this call returns, whatever the outcome.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, GenerateError> {
        let audio = self.validate(request)?;
        let prompt = self.prepare_prompt(&audio.bytes)?;

        let mut prompt_file = tempfile::Builder::new()
            .prefix("voice-prompt-")
            .suffix(".wav")
            .tempfile_in(&self.upload_dir)?;
        prompt_file.write_all(&prompt)?;
        prompt_file.flush()?;

        info!(
            text_len = request.text.len(),
            upload = %audio.file_name,
            "Generating voice"
        );

        let waveform = self.model.generate(&request.text, prompt_file.path())?;

        debug!(
            samples = waveform.samples.len(),
            sample_rate = waveform.sample_rate,
            duration_secs = waveform.duration_secs(),
            "Synthesis completed"
        );

        encode_wav(&waveform).map_err(GenerateError::Encode)
    }

    /// Decode the upload and trim it to the configured sample duration.
    fn prepare_prompt(&self, bytes: &[u8]) -> Result<Vec<u8>, GenerateError> {
        let mut reference = decode_wav(bytes).map_err(GenerateError::InvalidAudio)?;

        if reference.samples.is_empty() {
            return Err(GenerateError::InvalidAudio(AudioError::Empty));
        }

        let original_secs = reference.duration_secs();
        if !reference.truncate_secs(self.limits.sample_duration as f32) {
            return Ok(bytes.to_vec());
        }

        debug!(
            original_secs,
            kept_secs = self.limits.sample_duration,
            "Trimmed reference audio"
        );
        encode_wav(&reference).map_err(GenerateError::Encode)
    }
}
