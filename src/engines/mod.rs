//! Speech synthesis engines.
//!
//! This module contains wrappers around text-to-speech engines.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `coqui` - Coqui TTS (external `tts` executable, `pip install coqui-tts` required)

#[cfg(feature = "coqui")]
pub mod coqui;
