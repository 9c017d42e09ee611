//! CLI argument definitions for the HTTP service.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::engine::GenerationLimits;
use crate::logging::LogFormat;
use crate::model::{DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT, Device};
use crate::server::{DEFAULT_MAX_UPLOAD_BYTES, ServerConfig};

/// Voice cloning HTTP service.
#[derive(Parser, Debug)]
#[command(name = "voiceclone-rs")]
#[command(about = "Serve a pretrained voice-cloning model over HTTP")]
#[command(version)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "VOICECLONE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "VOICECLONE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Compute device: "auto" picks CUDA when the backend has it
    #[arg(short, long, value_enum, env = "VOICECLONE_DEVICE", default_value = "auto")]
    pub device: Device,

    /// Inference backend host
    #[arg(long, env = "VOICECLONE_BACKEND_HOST", default_value = DEFAULT_BACKEND_HOST)]
    pub backend_host: String,

    /// Inference backend port
    #[arg(long, env = "VOICECLONE_BACKEND_PORT", default_value_t = DEFAULT_BACKEND_PORT)]
    pub backend_port: u16,

    /// Maximum text length in characters
    #[arg(long, default_value_t = 500)]
    pub max_text_length: usize,

    /// Longest reference clip passed to the model, in seconds
    #[arg(long, default_value_t = 10)]
    pub sample_duration: u32,

    /// Largest accepted upload in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Directory for temporary reference clips (default: system temp dir)
    #[arg(long, env = "VOICECLONE_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

impl Args {
    /// Listener settings.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            addr: SocketAddr::new(self.host, self.port),
            max_upload_bytes: self.max_upload_bytes,
        }
    }

    /// Per-request limits.
    pub fn limits(&self) -> GenerationLimits {
        GenerationLimits {
            max_text_length: self.max_text_length,
            sample_duration: self.sample_duration,
        }
    }

    /// Where reference clips are staged.
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
