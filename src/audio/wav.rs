//! WAV encoding and decoding.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

/// Errors that can occur while reading or writing WAV data.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to decode WAV: {0}")]
    Decode(String),

    #[error("Failed to encode WAV: {0}")]
    Encode(String),

    #[error("Waveform contains no samples")]
    Empty,
}

/// Raw synthesized or decoded audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Interleaved samples in the range [-1.0, 1.0].
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Waveform {
    /// Create a mono waveform.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Cut the waveform down to at most `max_secs` seconds.
    ///
    /// Returns `true` if samples were dropped.
    pub fn truncate_secs(&mut self, max_secs: f32) -> bool {
        let max_frames = (max_secs.max(0.0) * self.sample_rate as f32) as usize;
        if self.frames() <= max_frames {
            return false;
        }
        self.samples
            .truncate(max_frames * self.channels.max(1) as usize);
        true
    }
}

/// Decode WAV bytes into a waveform.
///
/// Integer PCM of any bit depth is scaled to [-1.0, 1.0]; float PCM is
/// taken as-is.
pub fn decode_wav(bytes: &[u8]) -> Result<Waveform, AudioError> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| AudioError::Decode(e.to_string()))?;
    read_samples(reader)
}

/// Read a WAV file from disk.
pub fn read_wav_file(path: &Path) -> Result<Waveform, AudioError> {
    let reader = WavReader::open(path).map_err(|e| AudioError::Decode(e.to_string()))?;
    read_samples(reader)
}

fn read_samples<R: std::io::Read>(reader: WavReader<R>) -> Result<Waveform, AudioError> {
    let spec = reader.spec();

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioError::Decode(e.to_string()))?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AudioError::Decode(e.to_string()))?
        }
    };

    Ok(Waveform {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

fn float_spec(waveform: &Waveform) -> WavSpec {
    WavSpec {
        channels: waveform.channels,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Encode a waveform as an in-memory 32-bit float WAV.
pub fn encode_wav(waveform: &Waveform) -> Result<Vec<u8>, AudioError> {
    if waveform.samples.is_empty() {
        return Err(AudioError::Empty);
    }

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut buffer, float_spec(waveform))
            .map_err(|e| AudioError::Encode(e.to_string()))?;
        for &sample in &waveform.samples {
            writer
                .write_sample(sample)
                .map_err(|e| AudioError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioError::Encode(e.to_string()))?;
    }

    Ok(buffer.into_inner())
}

/// Write a waveform to a WAV file on disk.
pub fn write_wav_file(path: &Path, waveform: &Waveform) -> Result<(), AudioError> {
    let bytes = encode_wav(waveform)?;
    std::fs::write(path, bytes).map_err(|e| AudioError::Encode(e.to_string()))
}
