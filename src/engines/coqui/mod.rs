//! Coqui TTS engine implementation.
//!
//! This module drives the Coqui `tts` command-line tool: it knows the
//! published model catalog, validates settings before anything runs, turns
//! them into `tts` flags and runs the tool with retries and cancellation.
//! Synthesis happens out of process; the result is a WAV file on disk.
//!
//! # System Requirements
//!
//! The `tts` executable must be on `PATH` (or configured via
//! [`Settings::set_program`]):
//! - `pip install coqui-tts`
//!
//! Models are downloaded by the tool on first use.
//!
//! # Model Names
//!
//! Models are identified as `{category}/{language}/{dataset}/{architecture}`,
//! e.g. `tts_models/en/vctk/vits` or `vocoder_models/en/ljspeech/hifigan_v2`.
//! Models that speak several languages use `multilingual` in the language
//! slot and take the spoken language through `--language_idx`.
//!
//! | Model | Voice cloning | Languages |
//! |---|---|---|
//! | `xtts_v2` (default) | yes | all |
//! | `xtts_v1.1` | yes | all |
//! | `your_tts` | yes | all |
//! | `bark` | yes | all |
//! | `vits` (vctk) | no, speaker index | English |
//!
//! See [`presets`] for the full catalog.
//!
//! # Device Selection
//!
//! [`Device::Auto`] is resolved each time arguments are built: CUDA when
//! `nvidia-smi` is on `PATH`, MPS on Apple silicon, CPU otherwise.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use coqui_rs::{SynthesisEngine, engines::coqui::CoquiEngine};
//! use std::path::Path;
//!
//! let engine = CoquiEngine::xtts_v2()?;
//! let result = engine.synthesize("Hello, world!", Path::new("hello.wav"), None)?;
//! println!("Wrote {}", result.output_path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Voice Cloning With Cancellation
//!
//! ```rust,no_run
//! use coqui_rs::{SynthesisEngine, engines::coqui::{
//!     CancellationToken, CoquiEngine, CoquiSynthesisParams, Language, SettingsBuilder,
//! }};
//! use std::path::Path;
//!
//! let mut settings = SettingsBuilder::default()
//!     .speaker_sample("my_voice.wav")
//!     .output_dir("./out/")
//!     .build()?;
//! settings.set_language(Language::German)?;
//!
//! let engine = CoquiEngine::with_settings(settings);
//! let token = CancellationToken::new();
//! let params = CoquiSynthesisParams {
//!     cancellation: Some(token.clone()),
//! };
//!
//! engine.synthesize("Guten Tag!", Path::new("guten_tag.wav"), Some(params))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## From a JSON Config
//!
//! ```rust,no_run
//! use coqui_rs::engines::coqui::{Config, CoquiEngine};
//! use std::path::Path;
//!
//! let config = Config::from_json_file(Path::new("coqui.json"))?;
//! let engine = CoquiEngine::from_config(config)?;
//! println!("tts {}", engine.args().join(" "));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod args;
mod config;
mod dataset;
mod device;
mod engine;
mod language;
mod model;
pub mod presets;
mod process;

pub use config::{
    Config, Settings, SettingsBuilder, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_DIR, DEFAULT_PROGRAM,
};
pub use dataset::Dataset;
pub use device::{Device, DeviceProbe, SystemProbe};
pub use engine::{CoquiEngine, CoquiSynthesisParams};
pub use language::Language;
pub use model::{Architecture, Category, CoquiError, ModelIdentifier, ModelList};
pub use process::{run_with_retries, CancellationToken, CommandRunner, ProcessRunner};
