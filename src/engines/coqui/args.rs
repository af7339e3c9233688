//! Translation of [`Settings`] into `tts` command-line flags.
//!
//! Flag spellings belong to the Coqui CLI and must not change.

use std::path::Path;

use super::config::Settings;
use super::device::{Device, DeviceProbe};
use super::model::CoquiError;

/// Text to synthesize.
pub const TEXT: &str = "--text";
/// Pre-trained model, `<type>/<language>/<dataset>/<model_name>`.
pub const MODEL_NAME: &str = "--model_name";
/// Local model file.
pub const MODEL_PATH: &str = "--model_path";
/// Pre-trained vocoder, same format as `--model_name`.
pub const VOCODER_NAME: &str = "--vocoder_name";
/// Output wav file path.
pub const OUT_PATH: &str = "--out_path";
pub const USE_CUDA: &str = "--use_cuda";
pub const DEVICE: &str = "--device";
/// Target speaker id for a multi-speaker model.
pub const SPEAKER_IDX: &str = "--speaker_idx";
/// Target language id for a multi-lingual model.
pub const LANGUAGE_IDX: &str = "--language_idx";
/// Reference wav used to condition a voice cloning model.
pub const SPEAKER_WAV: &str = "--speaker_wav";
/// Recording to convert (voice conversion).
pub const SOURCE_WAV: &str = "--source_wav";
/// Voice to convert into (voice conversion).
pub const TARGET_WAV: &str = "--target_wav";

/// Build the model/device/speaker flags for a synthesis call.
///
/// `Device::Auto` is resolved through `probe`; text and output path are
/// appended by the caller.
pub fn to_args(settings: &Settings, probe: &impl DeviceProbe) -> Vec<String> {
    let device = settings.device().resolve(probe);
    let mut args = Vec::new();

    push(&mut args, DEVICE, device.as_str());

    match settings.model_path() {
        Some(path) => push(&mut args, MODEL_PATH, path_arg(path)),
        None => push(&mut args, MODEL_NAME, settings.model().name()),
    }

    if device == Device::Cuda {
        push(&mut args, USE_CUDA, "true");
    }

    if let Some(vocoder) = settings.vocoder().filter(|v| v.is_valid()) {
        push(&mut args, VOCODER_NAME, vocoder.name());
    }

    push_speaker_args(settings, &mut args);
    args
}

/// Build the flags for converting `source` into the voice of `target`.
pub fn voice_conversion_args(
    settings: &Settings,
    probe: &impl DeviceProbe,
    source: &Path,
    target: &Path,
) -> Result<Vec<String>, CoquiError> {
    let model = settings.voice_conversion().ok_or_else(|| {
        CoquiError::InvalidConfig("no voice conversion model configured".to_string())
    })?;
    let device = settings.device().resolve(probe);
    let mut args = Vec::new();

    push(&mut args, DEVICE, device.as_str());
    push(&mut args, MODEL_NAME, model.name());
    if device == Device::Cuda {
        push(&mut args, USE_CUDA, "true");
    }
    push(&mut args, SOURCE_WAV, path_arg(source));
    push(&mut args, TARGET_WAV, path_arg(target));
    Ok(args)
}

// Custom models: a sample wins over an index.
// Catalog models: cloning models get the sample and language, then any index.
fn push_speaker_args(settings: &Settings, args: &mut Vec<String>) {
    let language = settings.language().as_str();

    if settings.uses_custom_model() {
        if let Some(sample) = settings.speaker_sample() {
            push(args, SPEAKER_WAV, path_arg(sample));
            push(args, LANGUAGE_IDX, language);
        } else if let Some(idx) = settings.speaker_idx() {
            push(args, SPEAKER_IDX, idx);
        }
        return;
    }

    if settings.model().supports_voice_cloning() {
        if let Some(sample) = settings.speaker_sample() {
            push(args, SPEAKER_WAV, path_arg(sample));
        }
        push(args, LANGUAGE_IDX, language);
    }

    if let Some(idx) = settings.speaker_idx() {
        push(args, SPEAKER_IDX, idx);
    }
}

fn push(args: &mut Vec<String>, flag: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(value.into());
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
