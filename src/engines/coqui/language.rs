use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::CoquiError;

/// Languages understood by the pre-trained Coqui models.
///
/// Codes are mostly ISO 639-1 (`en`, `es`, ...). A few models use three-letter
/// or variant codes (`ewe`, `tw_akuapem`). `Universal` and `Multilingual` are
/// pseudo-languages for models that accept any language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Dutch,
    Chinese,
    Japanese,
    Polish,
    Turkish,
    Russian,
    Czech,
    Ukrainian,
    Hungarian,
    Korean,
    Arabic,
    Danish,
    Finnish,
    Swedish,
    Estonian,
    Latvian,
    Lithuanian,
    Bulgarian,
    Croatian,
    Slovak,
    Slovenian,
    Romanian,
    Greek,
    Irish,
    Maltese,
    Catalan,
    Bengali,
    Persian,
    Ewe,
    Hausa,
    Lingala,
    Yoruba,
    TwiAkuapem,
    TwiAsante,
    Belarusian,
    Universal,
    Multilingual,
}

impl Language {
    /// Every code the parser accepts, in catalog order. The pseudo-languages
    /// come last.
    pub const ALL: &'static [Language] = &[
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Dutch,
        Language::Chinese,
        Language::Japanese,
        Language::Polish,
        Language::Turkish,
        Language::Russian,
        Language::Czech,
        Language::Ukrainian,
        Language::Hungarian,
        Language::Korean,
        Language::Arabic,
        Language::Danish,
        Language::Finnish,
        Language::Swedish,
        Language::Estonian,
        Language::Latvian,
        Language::Lithuanian,
        Language::Bulgarian,
        Language::Croatian,
        Language::Slovak,
        Language::Slovenian,
        Language::Romanian,
        Language::Greek,
        Language::Irish,
        Language::Maltese,
        Language::Catalan,
        Language::Bengali,
        Language::Persian,
        Language::Ewe,
        Language::Hausa,
        Language::Lingala,
        Language::Yoruba,
        Language::TwiAkuapem,
        Language::TwiAsante,
        Language::Belarusian,
        Language::Universal,
        Language::Multilingual,
    ];

    /// Languages a model can actually speak: [`ALL`](Self::ALL) without
    /// `Universal` and `Multilingual`.
    pub const SPOKEN: &'static [Language] = Self::ALL.split_at(Self::ALL.len() - 2).0;

    /// The code passed to the tool and embedded in model names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Polish => "pl",
            Language::Turkish => "tr",
            Language::Russian => "ru",
            Language::Czech => "cs",
            Language::Ukrainian => "uk",
            Language::Hungarian => "hu",
            Language::Korean => "ko",
            Language::Arabic => "ar",
            Language::Danish => "da",
            Language::Finnish => "fi",
            Language::Swedish => "sv",
            Language::Estonian => "et",
            Language::Latvian => "lv",
            Language::Lithuanian => "lt",
            Language::Bulgarian => "bg",
            Language::Croatian => "hr",
            Language::Slovak => "sk",
            Language::Slovenian => "sl",
            Language::Romanian => "ro",
            Language::Greek => "el",
            Language::Irish => "ga",
            Language::Maltese => "mt",
            Language::Catalan => "ca",
            Language::Bengali => "bn",
            Language::Persian => "fa",
            Language::Ewe => "ewe",
            Language::Hausa => "hau",
            Language::Lingala => "lin",
            Language::Yoruba => "yor",
            Language::TwiAkuapem => "tw_akuapem",
            Language::TwiAsante => "tw_asante",
            Language::Belarusian => "be",
            Language::Universal => "universal",
            Language::Multilingual => "multilingual",
        }
    }

    /// True for the `universal` and `multilingual` pseudo-languages.
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Language::Universal | Language::Multilingual)
    }

    /// Parse user input such as `"en"`, `"EN"` or `"en-US"`.
    ///
    /// Region suffixes are dropped: the pre-trained models either have the
    /// variant built in or pick it up from the speaker sample.
    pub fn parse(input: &str) -> Result<Self, CoquiError> {
        let code = input.split('-').next().unwrap_or_default().to_lowercase();
        if code.is_empty() {
            return Err(CoquiError::UnsupportedLanguage(input.to_string()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == code)
            .ok_or_else(|| CoquiError::UnsupportedLanguage(input.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CoquiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = CoquiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn codes_match_model_names() {
        assert_eq!(Language::English.as_str(), "en");
        assert_eq!(Language::Spanish.to_string(), "es");
        assert_eq!(Language::TwiAkuapem.as_str(), "tw_akuapem");
    }

    #[test]
    fn parses_region_and_case_variants() {
        assert_eq!(Language::parse("en").unwrap(), Language::English);
        assert_eq!(Language::parse("en-US").unwrap(), Language::English);
        assert_eq!(Language::parse("En-US").unwrap(), Language::English);
        assert_eq!(Language::parse("EN").unwrap(), Language::English);
        assert_eq!(Language::parse("de-DE").unwrap(), Language::German);
        assert_eq!("tw_asante".parse::<Language>().unwrap(), Language::TwiAsante);
    }

    #[test]
    fn rejects_empty_and_unknown_codes() {
        assert!(Language::parse("").is_err());
        assert!(Language::parse("-US").is_err());
        assert!(Language::parse("xx").is_err());
        assert!(Language::parse("invalid").is_err());
    }

    #[test]
    fn every_code_round_trips_through_parse() {
        for lang in Language::ALL {
            assert_eq!(Language::parse(lang.as_str()).unwrap(), *lang);
        }
    }

    #[test]
    fn spoken_excludes_pseudo_languages() {
        assert_eq!(Language::SPOKEN.len(), 41);
        assert!(Language::SPOKEN.iter().all(|lang| !lang.is_wildcard()));
        assert_eq!(Language::SPOKEN.last(), Some(&Language::Belarusian));
        assert!(Language::ALL.iter().filter(|lang| lang.is_wildcard()).count() == 2);
    }

    #[test]
    fn deserializes_from_json_string() {
        let lang: Language = serde_json::from_str("\"pt-BR\"").unwrap();
        assert_eq!(lang, Language::Portuguese);
        assert!(serde_json::from_str::<Language>("\"klingon\"").is_err());
        assert_eq!(serde_json::to_string(&Language::French).unwrap(), "\"fr\"");
    }
}
