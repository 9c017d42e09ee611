//! voiceclone-rs HTTP service entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use voiceclone_rs::cli::Args;
use voiceclone_rs::engine::VoiceCloner;
use voiceclone_rs::logging::init_logging;
use voiceclone_rs::model::{HttpVoiceModel, VoiceModel};
use voiceclone_rs::server;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        device = %args.device,
        backend_host = %args.backend_host,
        backend_port = args.backend_port,
        "Loading voice model..."
    );

    // Loaded before the runtime exists: the model client blocks.
    let model = HttpVoiceModel::from_pretrained(args.device, &args.backend_host, args.backend_port)
        .context("Failed to load voice model")?;
    info!(device = %model.device(), model = %model.name(), "Model loaded");

    let upload_dir = args.upload_dir();
    std::fs::create_dir_all(&upload_dir)
        .with_context(|| format!("Failed to create upload directory: {}", upload_dir.display()))?;

    let cloner = Arc::new(VoiceCloner::with_upload_dir(model, args.limits(), upload_dir));
    let config = args.server_config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(server::run(&config, Arc::clone(&cloner)))
        .context("Server failed")?;

    // Shut the runtime down before the model client goes away.
    drop(runtime);
    drop(cloner);

    Ok(())
}
