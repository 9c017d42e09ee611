//! Voice cloning engine.
//!
//! Sits between the HTTP surface and the model: validates requests, stages
//! the reference clip on disk for the model's file-based interface, and
//! encodes the result as WAV.

mod cloner;

pub use cloner::{AudioUpload, GenerateError, GenerationLimits, GenerationRequest, VoiceCloner};
