//! Pre-trained models published for the Coqui `tts` tool.
//!
//! Names follow `{category}/{language}/{dataset}/{architecture}`; see
//! `tts --list_models` for the authoritative list.

use super::dataset::Dataset;
use super::language::Language;
use super::model::{Architecture, Category, ModelIdentifier, ModelList};

use Language::*;

const fn tts(
    dataset: Dataset,
    architecture: Architecture,
    language: Language,
    supported: &'static [Language],
) -> ModelIdentifier {
    ModelIdentifier::preset(Category::Tts, dataset, architecture, language, supported, false)
}

const fn cloning_tts(dataset: Dataset, architecture: Architecture) -> ModelIdentifier {
    ModelIdentifier::preset(
        Category::Tts,
        dataset,
        architecture,
        English,
        Language::SPOKEN,
        true,
    )
}

const fn vocoder(
    dataset: Dataset,
    architecture: Architecture,
    language: Language,
    supported: &'static [Language],
) -> ModelIdentifier {
    ModelIdentifier::preset(Category::Vocoder, dataset, architecture, language, supported, false)
}

const fn voice_conversion(dataset: Dataset, architecture: Architecture) -> ModelIdentifier {
    ModelIdentifier::preset(
        Category::VoiceConversion,
        dataset,
        architecture,
        English,
        Language::SPOKEN,
        false,
    )
}

// Multilingual, voice cloning
pub const XTTS_V2: ModelIdentifier = cloning_tts(Dataset::MultiDataset, Architecture::XTTS_V2);
pub const XTTS_V1: ModelIdentifier = cloning_tts(Dataset::MultiDataset, Architecture::XTTS_V1);
pub const YOUR_TTS: ModelIdentifier = cloning_tts(Dataset::MultiDataset, Architecture::YOUR_TTS);
pub const BARK: ModelIdentifier = cloning_tts(Dataset::MultiDataset, Architecture::BARK);

// Common Voice
pub const VITS_CV: ModelIdentifier = tts(
    Dataset::Cv,
    Architecture::VITS,
    Bulgarian,
    &[
        Bulgarian, Czech, Danish, Estonian, Irish, Greek, Croatian, Lithuanian, Latvian, Maltese,
        Portuguese, Romanian, Slovak, Slovenian, Swedish,
    ],
);

// English
pub const TACOTRON2_EK1: ModelIdentifier =
    tts(Dataset::Ek1, Architecture::TACOTRON2, English, &[English]);
pub const TACOTRON2_DDC_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::TACOTRON2_DDC, English, &[English]);
pub const TACOTRON2_DDC_PH_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::TACOTRON2_DDC_PH, English, &[English]);
pub const GLOW_TTS_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::GLOW_TTS, English, &[English]);
pub const SPEEDY_SPEECH_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::SPEEDY_SPEECH, English, &[English]);
pub const TACOTRON2_DCA_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::TACOTRON2_DCA, English, &[English]);
pub const VITS_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::VITS, English, &[English]);
pub const VITS_NEON_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::VITS_NEON, English, &[English]);
pub const FAST_PITCH_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::FAST_PITCH, English, &[English]);
pub const OVERFLOW_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::OVERFLOW, English, &[English]);
pub const NEURAL_HMM_LJSPEECH: ModelIdentifier =
    tts(Dataset::LjSpeech, Architecture::NEURAL_HMM, English, &[English]);
pub const VITS_VCTK: ModelIdentifier = tts(Dataset::Vctk, Architecture::VITS, English, &[English]);
pub const FAST_PITCH_VCTK: ModelIdentifier =
    tts(Dataset::Vctk, Architecture::FAST_PITCH, English, &[English]);
pub const TACOTRON2_DDC_SAM: ModelIdentifier =
    tts(Dataset::Sam, Architecture::TACOTRON2_DDC, English, &[English]);
pub const CAPACITRON_T2_C50_BLIZZARD: ModelIdentifier =
    tts(Dataset::Blizzard2013, Architecture::CAPACITRON_T2_C50, English, &[English]);
pub const CAPACITRON_T2_C150_V2_BLIZZARD: ModelIdentifier =
    tts(Dataset::Blizzard2013, Architecture::CAPACITRON_T2_C150_V2, English, &[English]);
pub const TORTOISE_V2: ModelIdentifier =
    tts(Dataset::MultiDataset, Architecture::TORTOISE_V2, English, &[English]);
pub const JENNY: ModelIdentifier = tts(Dataset::Jenny, Architecture::JENNY, English, &[English]);

// Mai
pub const TACOTRON2_DDC_MAI: ModelIdentifier =
    tts(Dataset::Mai, Architecture::TACOTRON2_DDC, Spanish, &[Spanish, French, Dutch]);
pub const GLOW_TTS_MAI: ModelIdentifier =
    tts(Dataset::Mai, Architecture::GLOW_TTS, Ukrainian, &[Ukrainian]);
pub const VITS_MAI: ModelIdentifier =
    tts(Dataset::Mai, Architecture::VITS, Ukrainian, &[Ukrainian]);

// CSS10
pub const VITS_CSS10: ModelIdentifier = tts(
    Dataset::Css10,
    Architecture::VITS,
    Spanish,
    &[Spanish, French, German, Dutch, Hungarian, Finnish],
);
pub const VITS_NEON_CSS10: ModelIdentifier =
    tts(Dataset::Css10, Architecture::VITS_NEON, German, &[German]);

// Single-language corpora
pub const TACOTRON2_DDC_GST_BAKER: ModelIdentifier =
    tts(Dataset::Baker, Architecture::TACOTRON2_DDC_GST, Chinese, &[Chinese]);
pub const TACOTRON2_DCA_THORSTEN: ModelIdentifier =
    tts(Dataset::Thorsten, Architecture::TACOTRON2_DCA, German, &[German]);
pub const VITS_THORSTEN: ModelIdentifier =
    tts(Dataset::Thorsten, Architecture::VITS, German, &[German]);
pub const TACOTRON2_DDC_THORSTEN: ModelIdentifier =
    tts(Dataset::Thorsten, Architecture::TACOTRON2_DDC, German, &[German]);
pub const TACOTRON2_DDC_KOKORO: ModelIdentifier =
    tts(Dataset::Kokoro, Architecture::TACOTRON2_DDC, Japanese, &[Japanese]);
pub const GLOW_TTS_COMMON_VOICE: ModelIdentifier =
    tts(Dataset::CommonVoice, Architecture::GLOW_TTS, Turkish, &[Turkish, Belarusian]);
pub const GLOW_TTS_MAI_FEMALE: ModelIdentifier =
    tts(Dataset::MaiFemale, Architecture::GLOW_TTS, Italian, &[Italian]);
pub const VITS_MAI_FEMALE: ModelIdentifier =
    tts(Dataset::MaiFemale, Architecture::VITS, Italian, &[Italian, Polish]);
pub const GLOW_TTS_MAI_MALE: ModelIdentifier =
    tts(Dataset::MaiMale, Architecture::GLOW_TTS, Italian, &[Italian]);
pub const VITS_MAI_MALE: ModelIdentifier =
    tts(Dataset::MaiMale, Architecture::VITS, Italian, &[Italian]);
pub const VITS_OPENBIBLE: ModelIdentifier = tts(
    Dataset::OpenBible,
    Architecture::VITS,
    Hausa,
    &[Ewe, Hausa, Lingala, TwiAkuapem, TwiAsante, Yoruba],
);
pub const VITS_CUSTOM: ModelIdentifier =
    tts(Dataset::Custom, Architecture::VITS, Catalan, &[Catalan, Bengali]);
pub const GLOW_TTS_CUSTOM: ModelIdentifier =
    tts(Dataset::Custom, Architecture::GLOW_TTS, Persian, &[Persian]);
pub const VITS_MALE_CUSTOM: ModelIdentifier =
    tts(Dataset::Custom, Architecture::VITS_MALE, Bengali, &[Bengali]);
pub const VITS_FEMALE_CUSTOM: ModelIdentifier =
    tts(Dataset::Custom, Architecture::VITS_FEMALE, Bengali, &[Bengali]);

// Vocoders
pub const WAVEGRAD_LIBRI_TTS: ModelIdentifier =
    vocoder(Dataset::LibriTts, Architecture::WAVEGRAD, Universal, &[Universal]);
pub const WAVEGRAD_EK1: ModelIdentifier =
    vocoder(Dataset::Ek1, Architecture::WAVEGRAD, English, &[English]);
pub const WAVEGRAD_THORSTEN: ModelIdentifier =
    vocoder(Dataset::Thorsten, Architecture::WAVEGRAD, German, &[German]);
pub const FULLBAND_MELGAN_LIBRI_TTS: ModelIdentifier =
    vocoder(Dataset::LibriTts, Architecture::FULLBAND_MELGAN, Universal, &[Universal]);
pub const FULLBAND_MELGAN_THORSTEN: ModelIdentifier =
    vocoder(Dataset::Thorsten, Architecture::FULLBAND_MELGAN, German, &[German]);
pub const MULTIBAND_MELGAN_LJSPEECH: ModelIdentifier =
    vocoder(Dataset::LjSpeech, Architecture::MULTIBAND_MELGAN, English, &[English]);
pub const MULTIBAND_MELGAN_MAI: ModelIdentifier =
    vocoder(Dataset::Mai, Architecture::MULTIBAND_MELGAN, Ukrainian, &[Ukrainian]);
pub const HIFIGAN_V1_THORSTEN: ModelIdentifier =
    vocoder(Dataset::Thorsten, Architecture::HIFIGAN_V1, German, &[German]);
pub const HIFIGAN_V1_KOKORO: ModelIdentifier =
    vocoder(Dataset::Kokoro, Architecture::HIFIGAN_V1, Japanese, &[Japanese]);
pub const HIFIGAN_V2_LJSPEECH: ModelIdentifier =
    vocoder(Dataset::LjSpeech, Architecture::HIFIGAN_V2, English, &[English]);
pub const HIFIGAN_V2_BLIZZARD2013: ModelIdentifier =
    vocoder(Dataset::Blizzard2013, Architecture::HIFIGAN_V2, English, &[English]);
pub const HIFIGAN_V2_VCTK: ModelIdentifier =
    vocoder(Dataset::Vctk, Architecture::HIFIGAN_V2, English, &[English]);
pub const HIFIGAN_V2_SAM: ModelIdentifier =
    vocoder(Dataset::Sam, Architecture::HIFIGAN_V2, English, &[English]);
pub const HIFIGAN_COMMON_VOICE_TURKISH: ModelIdentifier =
    vocoder(Dataset::CommonVoice, Architecture::HIFIGAN, Turkish, &[Turkish]);
pub const HIFIGAN_COMMON_VOICE_BELARUSIAN: ModelIdentifier =
    vocoder(Dataset::CommonVoice, Architecture::HIFIGAN, Belarusian, &[Belarusian]);
pub const UNIVNET_LJSPEECH: ModelIdentifier =
    vocoder(Dataset::LjSpeech, Architecture::UNIVNET, English, &[English]);
pub const PARALLEL_WAVEGAN_MAI: ModelIdentifier =
    vocoder(Dataset::Mai, Architecture::PARALLEL_WAVEGAN, Dutch, &[Dutch]);

// Voice conversion
pub const FREEVC24_VCTK: ModelIdentifier = voice_conversion(Dataset::Vctk, Architecture::FREEVC24);
pub const KNNVC: ModelIdentifier = voice_conversion(Dataset::MultiDataset, Architecture::KNNVC);
pub const OPENVOICE_V1: ModelIdentifier =
    voice_conversion(Dataset::MultiDataset, Architecture::OPENVOICE_V1);
pub const OPENVOICE_V2: ModelIdentifier =
    voice_conversion(Dataset::MultiDataset, Architecture::OPENVOICE_V2);

/// All pre-trained text-to-speech models.
pub fn tts_models() -> ModelList {
    ModelList::new(vec![
        XTTS_V2,
        XTTS_V1,
        YOUR_TTS,
        BARK,
        VITS_CV,
        TACOTRON2_EK1,
        TACOTRON2_DDC_LJSPEECH,
        TACOTRON2_DDC_PH_LJSPEECH,
        GLOW_TTS_LJSPEECH,
        SPEEDY_SPEECH_LJSPEECH,
        TACOTRON2_DCA_LJSPEECH,
        VITS_LJSPEECH,
        VITS_NEON_LJSPEECH,
        FAST_PITCH_LJSPEECH,
        OVERFLOW_LJSPEECH,
        NEURAL_HMM_LJSPEECH,
        VITS_VCTK,
        FAST_PITCH_VCTK,
        TACOTRON2_DDC_SAM,
        CAPACITRON_T2_C50_BLIZZARD,
        CAPACITRON_T2_C150_V2_BLIZZARD,
        TORTOISE_V2,
        JENNY,
        TACOTRON2_DDC_MAI,
        GLOW_TTS_MAI,
        VITS_MAI,
        VITS_CSS10,
        VITS_NEON_CSS10,
        TACOTRON2_DDC_GST_BAKER,
        TACOTRON2_DCA_THORSTEN,
        VITS_THORSTEN,
        TACOTRON2_DDC_THORSTEN,
        TACOTRON2_DDC_KOKORO,
        GLOW_TTS_COMMON_VOICE,
        GLOW_TTS_MAI_FEMALE,
        VITS_MAI_FEMALE,
        GLOW_TTS_MAI_MALE,
        VITS_MAI_MALE,
        VITS_OPENBIBLE,
        VITS_CUSTOM,
        GLOW_TTS_CUSTOM,
        VITS_MALE_CUSTOM,
        VITS_FEMALE_CUSTOM,
    ])
}

/// All pre-trained vocoders.
pub fn vocoders() -> ModelList {
    ModelList::new(vec![
        WAVEGRAD_LIBRI_TTS,
        WAVEGRAD_EK1,
        WAVEGRAD_THORSTEN,
        FULLBAND_MELGAN_LIBRI_TTS,
        FULLBAND_MELGAN_THORSTEN,
        MULTIBAND_MELGAN_LJSPEECH,
        MULTIBAND_MELGAN_MAI,
        HIFIGAN_V1_THORSTEN,
        HIFIGAN_V1_KOKORO,
        HIFIGAN_V2_LJSPEECH,
        HIFIGAN_V2_BLIZZARD2013,
        HIFIGAN_V2_VCTK,
        HIFIGAN_V2_SAM,
        HIFIGAN_COMMON_VOICE_TURKISH,
        HIFIGAN_COMMON_VOICE_BELARUSIAN,
        UNIVNET_LJSPEECH,
        PARALLEL_WAVEGAN_MAI,
    ])
}

/// All pre-trained voice conversion models.
pub fn voice_conversion_models() -> ModelList {
    ModelList::new(vec![FREEVC24_VCTK, KNNVC, OPENVOICE_V1, OPENVOICE_V2])
}

/// Every preset across all categories.
pub fn all() -> ModelList {
    tts_models()
        .into_iter()
        .chain(vocoders())
        .chain(voice_conversion_models())
        .collect()
}

/// Look up a preset by its full model name.
pub fn find(name: &str) -> Option<ModelIdentifier> {
    all().find(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for model in &all() {
            assert!(model.is_valid(), "{} should be valid", model.name());
            assert!(!model.is_custom());
        }
    }

    #[test]
    fn categories_are_consistent() {
        assert!(tts_models().iter().all(|m| m.category() == Category::Tts));
        assert!(vocoders().iter().all(|m| m.category() == Category::Vocoder));
        assert!(voice_conversion_models()
            .iter()
            .all(|m| m.category() == Category::VoiceConversion));
        assert_eq!(
            all().len(),
            tts_models().len() + vocoders().len() + voice_conversion_models().len()
        );
    }

    #[test]
    fn canonical_names() {
        assert_eq!(XTTS_V2.name(), "tts_models/multilingual/multi-dataset/xtts_v2");
        assert_eq!(VITS_FEMALE_CUSTOM.name(), "tts_models/bn/custom/vits-female");
        assert_eq!(HIFIGAN_V2_VCTK.name(), "vocoder_models/en/vctk/hifigan_v2");
        assert_eq!(FREEVC24_VCTK.name(), "voice_conversion_models/multilingual/vctk/freevc24");
    }

    #[test]
    fn only_the_cloning_models_clone() {
        let cloning: Vec<String> = tts_models()
            .into_iter()
            .filter(ModelIdentifier::supports_voice_cloning)
            .map(|m| m.architecture().to_string())
            .collect();
        assert_eq!(cloning, vec!["xtts_v2", "xtts_v1.1", "your_tts", "bark"]);
    }

    #[test]
    fn finds_presets_by_any_language_name() {
        assert_eq!(find("tts_models/en/ljspeech/vits"), Some(VITS_LJSPEECH));

        let german = find("tts_models/de/css10/vits").unwrap();
        assert_eq!(german.current_language(), Language::German);
        assert_eq!(german.default_language(), Language::Spanish);

        assert!(find("tts_models/en/ljspeech/does-not-exist").is_none());
    }

    #[test]
    fn pseudo_language_names_are_not_in_the_catalog() {
        assert_eq!(XTTS_V2.name_list().len(), Language::SPOKEN.len());
        assert!(find("tts_models/universal/multi-dataset/xtts_v2").is_none());
        let japanese = find("tts_models/ja/multi-dataset/xtts_v2").unwrap();
        assert_eq!(japanese.current_language(), Japanese);
        assert_eq!(
            find("vocoder_models/universal/libri-tts/wavegrad"),
            Some(WAVEGRAD_LIBRI_TTS)
        );
        assert!(find("vocoder_models/en/libri-tts/wavegrad").is_none());
    }

    #[test]
    fn parse_prefers_presets() {
        let m: ModelIdentifier = "tts_models/multilingual/multi-dataset/xtts_v2"
            .parse()
            .unwrap();
        assert_eq!(m, XTTS_V2);
        assert!(m.supports_voice_cloning());
    }

    #[test]
    fn filters_over_the_catalog() {
        let thorsten = tts_models().by_dataset(Dataset::Thorsten);
        assert_eq!(thorsten.len(), 3);

        let vits_german = tts_models()
            .by_architecture(&Architecture::VITS)
            .by_supported_languages(&[German]);
        assert_eq!(
            vits_german.names(),
            vec!["tts_models/multilingual/css10/vits", "tts_models/de/thorsten/vits"]
        );

        assert_eq!(vocoders().by_default_language(German).len(), 3);
        assert!(tts_models().multilingual().iter().any(|m| *m == XTTS_V2));
    }
}
