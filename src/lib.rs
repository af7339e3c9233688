//! # coqui-rs
//!
//! A Rust library for driving the [Coqui TTS](https://github.com/coqui-ai/TTS)
//! command-line tool.
//!
//! ## Features
//!
//! - **Model Catalog**: Every pre-trained TTS, vocoder and voice conversion model the tool ships
//! - **Validated Settings**: Builder and setters that reject bad combinations before anything runs
//! - **Retrying Runner**: Runs the `tts` executable, retries failed attempts, supports cancellation
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! coqui-rs = { version = "2026.2", features = ["coqui"] }
//! ```
//!
//! ```ignore
//! use std::path::Path;
//! use coqui_rs::{engines::coqui::CoquiEngine, SynthesisEngine};
//!
//! let engine = CoquiEngine::xtts_v2()?;
//! let result = engine.synthesize("Hello, world!", Path::new("hello.wav"), None)?;
//! println!("{:.2}s of audio", result.duration_secs()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engines;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// The result of a synthesis (text-to-speech) operation.
///
/// The audio itself lives on disk; this records where it was written and what
/// the external tool printed while producing it.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Path of the generated WAV file
    pub output_path: PathBuf,
    /// Combined stdout/stderr captured from the tool
    pub tool_output: Vec<u8>,
    /// Attempt number that succeeded (1-based)
    pub attempts: u32,
}

impl SynthesisResult {
    /// Captured tool output decoded as UTF-8, replacing invalid sequences.
    pub fn tool_output_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.tool_output)
    }

    /// Read the WAV header of the generated file.
    pub fn wav_spec(&self) -> Result<hound::WavSpec, hound::Error> {
        Ok(hound::WavReader::open(&self.output_path)?.spec())
    }

    /// Duration of the generated audio in seconds.
    pub fn duration_secs(&self) -> Result<f64, hound::Error> {
        let reader = hound::WavReader::open(&self.output_path)?;
        Ok(reader.duration() as f64 / reader.spec().sample_rate as f64)
    }
}

/// Common interface for text-to-speech synthesis engines.
///
/// Engines write audio to a file name resolved against their own output
/// directory and report the outcome as a [`SynthesisResult`].
pub trait SynthesisEngine {
    /// Per-call parameters (cancellation, etc.)
    type SynthesisParams: Default;
    /// Error type returned by the engine.
    type Error: std::error::Error + From<std::io::Error>;

    /// Synthesize speech from the given text into `file_name`.
    fn synthesize(
        &self,
        text: &str,
        file_name: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Self::Error>;

    /// Synthesize speech from the contents of a text file.
    ///
    /// Default implementation reads the whole file then calls `synthesize()`.
    fn synthesize_file(
        &self,
        input: &Path,
        file_name: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Self::Error> {
        let text = std::fs::read_to_string(input)?;
        self.synthesize(&text, file_name, params)
    }
}

#[cfg(test)]
mod tests {
    use super::SynthesisResult;

    fn write_silence(path: &std::path::Path, sample_rate: u32, samples: usize) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..samples {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_duration_of_generated_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        write_silence(&path, 22050, 11025);

        let result = SynthesisResult {
            output_path: path,
            tool_output: b" > Saving output to out.wav\n".to_vec(),
            attempts: 1,
        };

        assert_eq!(result.wav_spec().unwrap().sample_rate, 22050);
        assert!((result.duration_secs().unwrap() - 0.5).abs() < 1e-9);
        assert!(result.tool_output_lossy().contains("Saving output"));
    }

    #[test]
    fn missing_wav_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SynthesisResult {
            output_path: dir.path().join("missing.wav"),
            tool_output: Vec::new(),
            attempts: 1,
        };
        assert!(result.duration_secs().is_err());
    }
}
