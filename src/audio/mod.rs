//! Audio containers and WAV coding.
//!
//! Everything that crosses the service boundary is WAV: reference clips
//! come in as uploads, synthesized speech goes out as an attachment.

mod wav;

pub use wav::{AudioError, Waveform, decode_wav, encode_wav, read_wav_file, write_wav_file};

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn int16_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut buffer, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_encode_produces_riff_header() {
        let waveform = Waveform::mono(vec![0.0, 0.25, -0.25], 24000);
        let bytes = encode_wav(&waveform).unwrap();
        assert!(bytes.starts_with(b"RIFF"));
        assert_eq!(&bytes[8..12], b"WAVE");
    }

    #[test]
    fn test_encode_then_decode_preserves_float_samples() {
        let waveform = Waveform::mono(vec![0.1, -0.5, 0.999, 0.0], 24000);
        let decoded = decode_wav(&encode_wav(&waveform).unwrap()).unwrap();
        assert_eq!(decoded, waveform);
    }

    #[test]
    fn test_encode_empty_waveform_fails() {
        let waveform = Waveform::mono(vec![], 24000);
        assert!(matches!(encode_wav(&waveform), Err(AudioError::Empty)));
    }

    #[test]
    fn test_decode_int16_scales_to_unit_range() {
        let bytes = int16_wav(&[0, 16384, -32768], 16000);
        let waveform = decode_wav(&bytes).unwrap();

        assert_eq!(waveform.sample_rate, 16000);
        assert_eq!(waveform.channels, 1);
        assert_eq!(waveform.samples, vec![0.0, 0.5, -1.0]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_wav(b"definitely not a wav file");
        assert!(matches!(result, Err(AudioError::Decode(_))));
    }

    #[test]
    fn test_duration_secs() {
        let waveform = Waveform::mono(vec![0.0; 48000], 24000);
        assert_eq!(waveform.duration_secs(), 2.0);

        let stereo = Waveform {
            samples: vec![0.0; 48000],
            sample_rate: 24000,
            channels: 2,
        };
        assert_eq!(stereo.duration_secs(), 1.0);
    }

    #[test]
    fn test_truncate_secs_cuts_long_clip() {
        let mut waveform = Waveform::mono(vec![0.0; 16000 * 12], 16000);
        assert!(waveform.truncate_secs(10.0));
        assert_eq!(waveform.frames(), 160000);
    }

    #[test]
    fn test_truncate_secs_keeps_short_clip() {
        let mut waveform = Waveform::mono(vec![0.0; 8000], 16000);
        assert!(!waveform.truncate_secs(10.0));
        assert_eq!(waveform.frames(), 8000);
    }

    #[test]
    fn test_truncate_secs_keeps_frames_whole() {
        let mut stereo = Waveform {
            samples: vec![0.0; 40],
            sample_rate: 10,
            channels: 2,
        };
        assert!(stereo.truncate_secs(1.0));
        assert_eq!(stereo.samples.len(), 20);
    }

    #[test]
    fn test_write_and_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.wav");
        let waveform = Waveform::mono(vec![0.2; 100], 22050);

        write_wav_file(&path, &waveform).unwrap();
        let loaded = read_wav_file(&path).unwrap();

        assert_eq!(loaded, waveform);
    }
}
