//! Minimal voice cloning example.
//!
//! Loads the model on CPU, speaks a fixed line in the voice of `./Shyam.wav`
//! and writes the result to `test-turbo.wav`.

use std::path::Path;

use anyhow::Result;
use voiceclone_rs::audio::write_wav_file;
use voiceclone_rs::model::{
    DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT, Device, HttpVoiceModel, VoiceModel,
};

const TEXT: &str = "Hi there, Prasath how is your health";
const REFERENCE: &str = "./Shyam.wav";
const OUTPUT: &str = "test-turbo.wav";

fn main() -> Result<()> {
    let model = HttpVoiceModel::from_pretrained(Device::Cpu, DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT)?;

    let wav = model.generate(TEXT, Path::new(REFERENCE))?;

    write_wav_file(Path::new(OUTPUT), &wav)?;
    println!("Saved {} ({:.2}s at {} Hz)", OUTPUT, wav.duration_secs(), model.sample_rate());

    Ok(())
}
