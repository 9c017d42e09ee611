//! voiceclone-rs: voice cloning over HTTP.
//!
//! This crate serves a pretrained text-to-speech voice-cloning model
//! (Chatterbox Turbo, hosted by an inference backend) through a small HTTP
//! service, plus a command-line example.

pub mod audio;
pub mod cli;
pub mod engine;
pub mod logging;
pub mod model;
pub mod server;
