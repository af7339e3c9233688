use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::language::Language;

#[derive(thiserror::Error, Debug)]
pub enum CoquiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Unsupported dataset: {0}")]
    UnsupportedDataset(String),
    #[error("Unsupported device: {0}")]
    UnsupportedDevice(String),
    #[error("Unsupported model category: {0}")]
    UnsupportedCategory(String),
    #[error("Model '{0}' is not in the catalog")]
    UnknownModel(String),
    #[error("Text cannot be empty")]
    EmptyText,
    #[error("Audio file already exists at {}", .0.display())]
    OutputExists(PathBuf),
    #[error("`{0}` not found. Install Coqui TTS: `pip install coqui-tts`")]
    ToolNotFound(String),
    #[error("TTS command failed with exit code {code:?}")]
    ToolFailed { code: Option<i32>, output: String },
    #[error("Synthesis cancelled")]
    Cancelled,
}

/// Class of model; the wire name is the first segment of a model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "tts_models")]
    Tts,
    #[serde(rename = "vocoder_models")]
    Vocoder,
    #[serde(rename = "voice_conversion_models")]
    VoiceConversion,
}

impl Category {
    pub const ALL: &'static [Category] =
        &[Category::Tts, Category::Vocoder, Category::VoiceConversion];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Tts => "tts_models",
            Category::Vocoder => "vocoder_models",
            Category::VoiceConversion => "voice_conversion_models",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoquiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoquiError::UnsupportedCategory(s.to_string()))
    }
}

/// Model family, e.g. `vits` or `hifigan_v2`.
///
/// Kept as a string so custom models can name architectures the catalog
/// doesn't know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Architecture(Cow<'static, str>);

impl Architecture {
    // TTS
    pub const XTTS_V2: Architecture = Architecture::from_static("xtts_v2");
    pub const XTTS_V1: Architecture = Architecture::from_static("xtts_v1.1");
    pub const YOUR_TTS: Architecture = Architecture::from_static("your_tts");
    pub const BARK: Architecture = Architecture::from_static("bark");
    pub const VITS: Architecture = Architecture::from_static("vits");
    pub const VITS_NEON: Architecture = Architecture::from_static("vits--neon");
    pub const VITS_MALE: Architecture = Architecture::from_static("vits-male");
    pub const VITS_FEMALE: Architecture = Architecture::from_static("vits-female");
    pub const TACOTRON2: Architecture = Architecture::from_static("tacotron2");
    pub const TACOTRON2_DDC: Architecture = Architecture::from_static("tacotron2-DDC");
    pub const TACOTRON2_DDC_PH: Architecture = Architecture::from_static("tacotron2-DDC_ph");
    pub const TACOTRON2_DCA: Architecture = Architecture::from_static("tacotron2-DCA");
    pub const TACOTRON2_DDC_GST: Architecture = Architecture::from_static("tacotron2-DDC-GST");
    pub const GLOW_TTS: Architecture = Architecture::from_static("glow-tts");
    pub const FAST_PITCH: Architecture = Architecture::from_static("fast_pitch");
    pub const SPEEDY_SPEECH: Architecture = Architecture::from_static("speedy-speech");
    pub const OVERFLOW: Architecture = Architecture::from_static("overflow");
    pub const NEURAL_HMM: Architecture = Architecture::from_static("neural_hmm");
    pub const TORTOISE_V2: Architecture = Architecture::from_static("tortoise-v2");
    pub const CAPACITRON_T2_C50: Architecture = Architecture::from_static("capacitron-t2-c50");
    pub const CAPACITRON_T2_C150_V2: Architecture =
        Architecture::from_static("capacitron-t2-c150_v2");
    pub const JENNY: Architecture = Architecture::from_static("jenny");

    // Vocoders
    pub const WAVEGRAD: Architecture = Architecture::from_static("wavegrad");
    pub const FULLBAND_MELGAN: Architecture = Architecture::from_static("fullband-melgan");
    pub const MULTIBAND_MELGAN: Architecture = Architecture::from_static("multiband-melgan");
    pub const HIFIGAN_V1: Architecture = Architecture::from_static("hifigan_v1");
    pub const HIFIGAN_V2: Architecture = Architecture::from_static("hifigan_v2");
    pub const HIFIGAN: Architecture = Architecture::from_static("hifigan");
    pub const UNIVNET: Architecture = Architecture::from_static("univnet");
    pub const PARALLEL_WAVEGAN: Architecture = Architecture::from_static("parallel-wavegan");

    // Voice conversion
    pub const FREEVC24: Architecture = Architecture::from_static("freevc24");
    pub const KNNVC: Architecture = Architecture::from_static("knnvc");
    pub const OPENVOICE_V1: Architecture = Architecture::from_static("openvoice_v1");
    pub const OPENVOICE_V2: Architecture = Architecture::from_static("openvoice_v2");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Architecture {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Architecture {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Canonical identifier for every model the tool can load: TTS models,
/// vocoders and voice conversion models alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIdentifier {
    pub(crate) category: Category,
    pub(crate) dataset: Dataset,
    pub(crate) architecture: Architecture,
    /// The catalog doesn't record a default for most models, so presets use
    /// English where available and otherwise the first supported language.
    pub(crate) default_language: Language,
    pub(crate) current_language: Language,
    pub(crate) supported_languages: Cow<'static, [Language]>,
    pub(crate) voice_cloning: bool,
    pub(crate) custom: bool,
}

impl ModelIdentifier {
    /// Catalog entry constructor, usable in `const` position.
    pub(crate) const fn preset(
        category: Category,
        dataset: Dataset,
        architecture: Architecture,
        language: Language,
        supported_languages: &'static [Language],
        voice_cloning: bool,
    ) -> Self {
        Self {
            category,
            dataset,
            architecture,
            default_language: language,
            current_language: language,
            supported_languages: Cow::Borrowed(supported_languages),
            voice_cloning,
            custom: false,
        }
    }

    /// Create a custom identifier for a model the catalog doesn't list.
    ///
    /// For TTS and voice conversion models `Universal` and `Multilingual`
    /// expand to every spoken language, with English selected.
    /// Custom models don't advertise voice cloning unless
    /// [`with_voice_cloning`](Self::with_voice_cloning) says so.
    pub fn new(
        category: Category,
        architecture: impl Into<Architecture>,
        dataset: Dataset,
        language: Language,
    ) -> Result<Self, CoquiError> {
        let architecture = architecture.into();
        if architecture.is_empty() {
            return Err(CoquiError::InvalidConfig(
                "model architecture cannot be empty".to_string(),
            ));
        }

        // A wildcard vocoder is published under the wildcard name itself.
        let (language, supported_languages) =
            if language.is_wildcard() && category != Category::Vocoder {
                (Language::English, Cow::Borrowed(Language::SPOKEN))
            } else {
                (language, Cow::Owned(vec![language]))
            };

        Ok(Self {
            category,
            dataset,
            architecture,
            default_language: language,
            current_language: language,
            supported_languages,
            voice_cloning: false,
            custom: true,
        })
    }

    pub fn with_voice_cloning(mut self, enabled: bool) -> Self {
        self.voice_cloning = enabled;
        self
    }

    /// Return a copy targeting `language`, which must be supported.
    pub fn with_language(mut self, language: Language) -> Result<Self, CoquiError> {
        self.set_current_language(language)?;
        Ok(self)
    }

    pub(crate) fn set_current_language(&mut self, language: Language) -> Result<(), CoquiError> {
        if !self.accepts_language(language) {
            return Err(CoquiError::UnsupportedLanguage(format!(
                "{language} is not supported by {}",
                self.name()
            )));
        }
        self.current_language = language;
        Ok(())
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn current_language(&self) -> Language {
        self.current_language
    }

    pub fn supported_languages(&self) -> &[Language] {
        &self.supported_languages
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn supports_voice_cloning(&self) -> bool {
        self.voice_cloning
    }

    pub fn is_multilingual(&self) -> bool {
        self.supported_languages.len() > 1
    }

    pub fn supports_language(&self, language: Language) -> bool {
        self.supported_languages.contains(&language)
    }

    // Only vocoders may target a pseudo-language.
    fn accepts_language(&self, language: Language) -> bool {
        (self.category == Category::Vocoder || !language.is_wildcard())
            && self.supports_language(language)
    }

    /// Full model name as accepted by `--model_name` / `--vocoder_name`.
    ///
    /// Format: `{category}/{language}/{dataset}/{architecture}`. TTS and voice
    /// conversion models that support more than one language use
    /// `multilingual` in the language slot. Vocoders always use their current
    /// language.
    pub fn name(&self) -> String {
        let language = if self.category != Category::Vocoder && self.is_multilingual() {
            Language::Multilingual
        } else {
            self.current_language
        };
        self.name_for(language)
    }

    /// One name per supported language.
    pub fn name_list(&self) -> Vec<String> {
        self.supported_languages
            .iter()
            .map(|&lang| self.name_for(lang))
            .collect()
    }

    fn name_for(&self, language: Language) -> String {
        format!(
            "{}/{}/{}/{}",
            self.category, language, self.dataset, self.architecture
        )
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check the identifier invariants. Custom identifiers are trusted.
    pub fn validate(&self) -> Result<(), CoquiError> {
        if self.custom {
            return Ok(());
        }
        if self.architecture.is_empty() {
            return Err(CoquiError::InvalidConfig(format!(
                "architecture cannot be empty for model type: {}",
                self.category
            )));
        }
        if self.supported_languages.is_empty() {
            return Err(CoquiError::InvalidConfig(format!(
                "supported languages cannot be empty for model type: {}",
                self.category
            )));
        }
        if !self.accepts_language(self.current_language) {
            return Err(CoquiError::UnsupportedLanguage(format!(
                "{} is not supported by {}",
                self.current_language,
                self.name()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ModelIdentifier {
    type Err = CoquiError;

    /// Parse a full model name such as `tts_models/en/ljspeech/vits`.
    ///
    /// Catalog entries are returned as-is (with the language from the name
    /// selected); anything else becomes a custom identifier.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Some(model) = super::presets::find(name) {
            return Ok(model);
        }

        let parts: Vec<&str> = name.split('/').collect();
        let [category, language, dataset, architecture] = parts.as_slice() else {
            return Err(CoquiError::UnknownModel(name.to_string()));
        };

        Self::new(
            category.parse()?,
            architecture.to_string(),
            dataset.parse()?,
            Language::parse(language)?,
        )
    }
}

/// Owned collection of identifiers with chainable filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelList {
    models: Vec<ModelIdentifier>,
}

impl ModelList {
    pub fn new(models: Vec<ModelIdentifier>) -> Self {
        Self { models }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelIdentifier> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn into_vec(self) -> Vec<ModelIdentifier> {
        self.models
    }

    pub fn names(&self) -> Vec<String> {
        self.models.iter().map(ModelIdentifier::name).collect()
    }

    pub fn by_category(self, category: Category) -> Self {
        self.filter(|m| m.category == category)
    }

    pub fn by_architecture(self, architecture: &Architecture) -> Self {
        self.filter(|m| &m.architecture == architecture)
    }

    pub fn by_dataset(self, dataset: Dataset) -> Self {
        self.filter(|m| m.dataset == dataset)
    }

    /// Models supporting at least one of `languages`.
    pub fn by_supported_languages(self, languages: &[Language]) -> Self {
        self.filter(|m| languages.iter().any(|&lang| m.supports_language(lang)))
    }

    pub fn by_default_language(self, language: Language) -> Self {
        self.filter(|m| m.default_language == language)
    }

    pub fn multilingual(self) -> Self {
        self.filter(ModelIdentifier::is_multilingual)
    }

    /// Look a model up by full name.
    ///
    /// Matches the canonical [`name`](ModelIdentifier::name) first, then any
    /// per-language name, in which case the returned copy targets that
    /// language.
    pub fn find(&self, name: &str) -> Option<ModelIdentifier> {
        if let Some(model) = self.models.iter().find(|m| m.name() == name) {
            return Some(model.clone());
        }
        self.models.iter().find_map(|m| {
            m.supported_languages
                .iter()
                .find(|&&lang| m.name_for(lang) == name)
                .map(|&lang| {
                    let mut model = m.clone();
                    model.current_language = lang;
                    model
                })
        })
    }

    fn filter(self, keep: impl Fn(&ModelIdentifier) -> bool) -> Self {
        self.models.into_iter().filter(|m| keep(m)).collect()
    }
}

impl FromIterator<ModelIdentifier> for ModelList {
    fn from_iter<I: IntoIterator<Item = ModelIdentifier>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ModelList {
    type Item = ModelIdentifier;
    type IntoIter = std::vec::IntoIter<ModelIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModelList {
    type Item = &'a ModelIdentifier;
    type IntoIter = std::slice::Iter<'a, ModelIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}
