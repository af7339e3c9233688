use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::CoquiError;

/// Training corpus identifier embedded in a model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dataset {
    // Universal / multilingual
    LibriTts,
    MultiDataset,
    // English
    LjSpeech,
    Vctk,
    Ek1,
    Sam,
    Blizzard2013,
    Jenny,
    // Language specific
    Mai,
    Css10,
    Cv,
    CommonVoice,
    Thorsten,
    Baker,
    Kokoro,
    OpenBible,
    Custom,
    MaiFemale,
    MaiMale,
}

impl Dataset {
    /// Every dataset that appears in a pre-trained model name.
    pub const ALL: &'static [Dataset] = &[
        Dataset::LibriTts,
        Dataset::MultiDataset,
        Dataset::LjSpeech,
        Dataset::Vctk,
        Dataset::Ek1,
        Dataset::Sam,
        Dataset::Blizzard2013,
        Dataset::Jenny,
        Dataset::Mai,
        Dataset::Css10,
        Dataset::Cv,
        Dataset::CommonVoice,
        Dataset::Thorsten,
        Dataset::Baker,
        Dataset::Kokoro,
        Dataset::OpenBible,
        Dataset::Custom,
        Dataset::MaiFemale,
        Dataset::MaiMale,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Dataset::LibriTts => "libri-tts",
            Dataset::MultiDataset => "multi-dataset",
            Dataset::LjSpeech => "ljspeech",
            Dataset::Vctk => "vctk",
            Dataset::Ek1 => "ek1",
            Dataset::Sam => "sam",
            Dataset::Blizzard2013 => "blizzard2013",
            Dataset::Jenny => "jenny",
            Dataset::Mai => "mai",
            Dataset::Css10 => "css10",
            Dataset::Cv => "cv",
            Dataset::CommonVoice => "common-voice",
            Dataset::Thorsten => "thorsten",
            Dataset::Baker => "baker",
            Dataset::Kokoro => "kokoro",
            Dataset::OpenBible => "openbible",
            Dataset::Custom => "custom",
            Dataset::MaiFemale => "mai_female",
            Dataset::MaiMale => "mai_male",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = CoquiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoquiError::UnsupportedDataset(s.to_string()))
    }
}

impl TryFrom<String> for Dataset {
    type Error = CoquiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dataset> for String {
    fn from(dataset: Dataset) -> Self {
        dataset.as_str().to_string()
    }
}
