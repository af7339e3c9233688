use std::path::{Path, PathBuf};

use derive_builder::{Builder, UninitializedFieldError};
use serde::{Deserialize, Serialize};

use super::device::Device;
use super::language::Language;
use super::model::{Category, CoquiError, ModelIdentifier};
use super::presets;

pub const DEFAULT_OUTPUT_DIR: &str = "./dist/";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Executable installed by `pip install coqui-tts`.
pub const DEFAULT_PROGRAM: &str = "tts";

/// Everything needed to build a `tts` invocation.
///
/// Build with [`SettingsBuilder`] or start from [`Settings::default`] and use
/// the `set_*` methods. Both paths validate every value they accept, so a
/// `Settings` is always consistent.
///
/// ```rust
/// use coqui_rs::engines::coqui::{presets, Device, SettingsBuilder};
///
/// let settings = SettingsBuilder::default()
///     .model(presets::VITS_VCTK)
///     .speaker_idx("p225")
///     .device(Device::Cpu)
///     .build()?;
/// assert_eq!(settings.max_retries(), 3);
/// # Ok::<(), coqui_rs::engines::coqui::CoquiError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate", error = "CoquiError"))]
pub struct Settings {
    /// Text-to-speech model.
    #[builder(default = "presets::XTTS_V2")]
    model: ModelIdentifier,
    /// Local model file; replaces `--model_name` with `--model_path`.
    #[builder(setter(into, strip_option), default)]
    model_path: Option<PathBuf>,
    #[builder(setter(strip_option), default)]
    vocoder: Option<ModelIdentifier>,
    #[builder(setter(strip_option), default)]
    voice_conversion: Option<ModelIdentifier>,
    /// Reference recording for voice cloning models.
    #[builder(setter(into, strip_option), default)]
    speaker_sample: Option<PathBuf>,
    /// Speaker id for multi-speaker models, e.g. `p225` for VCTK.
    #[builder(setter(into, strip_option), default)]
    speaker_idx: Option<String>,
    #[builder(setter(into), default = "PathBuf::from(DEFAULT_OUTPUT_DIR)")]
    output_dir: PathBuf,
    #[builder(default)]
    device: Device,
    /// Synthesis attempts before giving up; at least 1.
    #[builder(default = "DEFAULT_MAX_RETRIES")]
    max_retries: u32,
    #[builder(setter(into), default = "DEFAULT_PROGRAM.to_string()")]
    program: String,
}

impl From<UninitializedFieldError> for CoquiError {
    fn from(err: UninitializedFieldError) -> Self {
        CoquiError::InvalidConfig(err.to_string())
    }
}

impl SettingsBuilder {
    fn validate(&self) -> Result<(), CoquiError> {
        if let Some(model) = &self.model {
            check_model(model, Category::Tts)?;
        }
        if let Some(Some(vocoder)) = &self.vocoder {
            check_model(vocoder, Category::Vocoder)?;
        }
        if let Some(Some(vc)) = &self.voice_conversion {
            check_model(vc, Category::VoiceConversion)?;
        }
        if let Some(Some(path)) = &self.model_path {
            non_empty_path(path, "model path")?;
        }
        if let Some(Some(path)) = &self.speaker_sample {
            non_empty_path(path, "speaker sample path")?;
        }
        if let Some(Some(idx)) = &self.speaker_idx {
            non_empty(idx, "speaker index")?;
        }
        if let Some(dir) = &self.output_dir {
            non_empty_path(dir, "output directory")?;
        }
        if let Some(retries) = self.max_retries {
            check_retries(retries)?;
        }
        if let Some(program) = &self.program {
            non_empty(program, "program")?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: presets::XTTS_V2,
            model_path: None,
            vocoder: None,
            voice_conversion: None,
            speaker_sample: None,
            speaker_idx: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            device: Device::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Settings {
    pub fn model(&self) -> &ModelIdentifier {
        &self.model
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    pub fn vocoder(&self) -> Option<&ModelIdentifier> {
        self.vocoder.as_ref()
    }

    pub fn voice_conversion(&self) -> Option<&ModelIdentifier> {
        self.voice_conversion.as_ref()
    }

    pub fn language(&self) -> Language {
        self.model.current_language()
    }

    pub fn speaker_sample(&self) -> Option<&Path> {
        self.speaker_sample.as_deref()
    }

    pub fn speaker_idx(&self) -> Option<&str> {
        self.speaker_idx.as_deref()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// A custom identifier or a local model file is in use.
    pub fn uses_custom_model(&self) -> bool {
        self.model.is_custom() || self.model_path.is_some()
    }

    /// Switch model. The language resets to the model's default and any
    /// local model path is dropped.
    pub fn set_model(&mut self, model: ModelIdentifier) -> Result<(), CoquiError> {
        check_model(&model, Category::Tts)?;
        self.model = model;
        self.model.current_language = self.model.default_language;
        self.model_path = None;
        Ok(())
    }

    /// Use a local model file. The file must exist.
    pub fn set_model_path(&mut self, path: impl Into<PathBuf>) -> Result<(), CoquiError> {
        let path = path.into();
        non_empty_path(&path, "model path")?;
        if !path.exists() {
            return Err(CoquiError::InvalidConfig(format!(
                "model path does not exist: {}",
                path.display()
            )));
        }
        self.model_path = Some(path);
        Ok(())
    }

    pub fn set_vocoder(&mut self, vocoder: ModelIdentifier) -> Result<(), CoquiError> {
        check_model(&vocoder, Category::Vocoder)?;
        self.vocoder = Some(vocoder);
        Ok(())
    }

    pub fn clear_vocoder(&mut self) {
        self.vocoder = None;
    }

    pub fn set_voice_conversion(&mut self, model: ModelIdentifier) -> Result<(), CoquiError> {
        check_model(&model, Category::VoiceConversion)?;
        self.voice_conversion = Some(model);
        Ok(())
    }

    /// Target language; must be supported by the current model.
    pub fn set_language(&mut self, language: Language) -> Result<(), CoquiError> {
        self.model.set_current_language(language)
    }

    pub fn set_vocoder_language(&mut self, language: Language) -> Result<(), CoquiError> {
        let vocoder = self
            .vocoder
            .as_mut()
            .ok_or_else(|| CoquiError::InvalidConfig("no vocoder configured".to_string()))?;
        vocoder.set_current_language(language)
    }

    /// Set the speaker from a single string.
    ///
    /// Something that looks like a file (has an extension) becomes the
    /// speaker sample when the model can clone voices; anything else is
    /// treated as a speaker index.
    pub fn set_speaker(&mut self, speaker: &str) -> Result<(), CoquiError> {
        non_empty(speaker, "speaker")?;
        let path = Path::new(speaker);
        if path.extension().is_some() && self.model.supports_voice_cloning() {
            self.speaker_sample = Some(path.to_path_buf());
        } else {
            self.speaker_idx = Some(speaker.to_string());
        }
        Ok(())
    }

    pub fn set_speaker_sample(&mut self, path: impl Into<PathBuf>) -> Result<(), CoquiError> {
        let path = path.into();
        non_empty_path(&path, "speaker sample path")?;
        self.speaker_sample = Some(path);
        Ok(())
    }

    pub fn set_speaker_index(&mut self, idx: impl Into<String>) -> Result<(), CoquiError> {
        let idx = idx.into();
        non_empty(&idx, "speaker index")?;
        self.speaker_idx = Some(idx);
        Ok(())
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), CoquiError> {
        let dir = dir.into();
        non_empty_path(&dir, "output directory")?;
        self.output_dir = dir;
        Ok(())
    }

    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub fn set_max_retries(&mut self, retries: u32) -> Result<(), CoquiError> {
        check_retries(retries)?;
        self.max_retries = retries;
        Ok(())
    }

    pub fn set_program(&mut self, program: impl Into<String>) -> Result<(), CoquiError> {
        let program = program.into();
        non_empty(&program, "program")?;
        self.program = program;
        Ok(())
    }
}

fn check_model(model: &ModelIdentifier, expected: Category) -> Result<(), CoquiError> {
    if model.category() != expected {
        return Err(CoquiError::InvalidConfig(format!(
            "{} is a {} model, expected {}",
            model.name(),
            model.category(),
            expected
        )));
    }
    model.validate()
}

fn check_retries(retries: u32) -> Result<(), CoquiError> {
    if retries < 1 {
        return Err(CoquiError::InvalidConfig(
            "max retries must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn non_empty(value: &str, what: &str) -> Result<(), CoquiError> {
    if value.is_empty() {
        return Err(CoquiError::InvalidConfig(format!("{what} cannot be empty")));
    }
    Ok(())
}

fn non_empty_path(path: &Path, what: &str) -> Result<(), CoquiError> {
    if path.as_os_str().is_empty() {
        return Err(CoquiError::InvalidConfig(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// On-disk configuration, e.g. `coqui.json`:
///
/// ```json
/// {
///   "model": "tts_models/en/vctk/vits",
///   "speakerIdx": "p225",
///   "device": "cpu",
///   "maxRetries": 2,
///   "distDir": "./out/"
/// }
/// ```
///
/// Models are referenced by their full name. Unset fields keep the
/// [`Settings`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    pub model: Option<String>,
    pub model_path: Option<PathBuf>,
    pub vocoder: Option<String>,
    pub voice_conversion: Option<String>,
    pub language: Option<Language>,
    pub speaker_wav_file: Option<PathBuf>,
    pub speaker_idx: Option<String>,
    pub max_retries: Option<u32>,
    pub dist_dir: Option<PathBuf>,
    pub device: Option<Device>,
    pub program: Option<String>,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, CoquiError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CoquiError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Apply every field through the validated setters.
    pub fn into_settings(self) -> Result<Settings, CoquiError> {
        let mut settings = Settings::default();

        if let Some(name) = &self.model {
            settings.set_model(name.parse()?)?;
        }
        if let Some(path) = self.model_path {
            settings.set_model_path(path)?;
        }
        if let Some(language) = self.language {
            settings.set_language(language)?;
        }
        if let Some(name) = &self.vocoder {
            settings.set_vocoder(name.parse()?)?;
        }
        if let Some(name) = &self.voice_conversion {
            settings.set_voice_conversion(name.parse()?)?;
        }
        if let Some(path) = self.speaker_wav_file {
            settings.set_speaker_sample(path)?;
        }
        if let Some(idx) = self.speaker_idx {
            settings.set_speaker_index(idx)?;
        }
        if let Some(retries) = self.max_retries {
            settings.set_max_retries(retries)?;
        }
        if let Some(dir) = self.dist_dir {
            settings.set_output_dir(dir)?;
        }
        if let Some(device) = self.device {
            settings.set_device(device);
        }
        if let Some(program) = self.program {
            settings.set_program(program)?;
        }

        Ok(settings)
    }
}
