use std::path::Path;
use std::time::Instant;

use coqui_rs::{
    engines::coqui::{presets, CoquiEngine, Device, Language, ModelList, SettingsBuilder},
    SynthesisEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cloning: ModelList = presets::tts_models()
        .into_iter()
        .filter(|m| m.supports_voice_cloning())
        .collect();
    println!("Voice cloning models: {:?}", cloning.names());

    let mut settings = SettingsBuilder::default()
        .model(presets::XTTS_V2)
        .speaker_sample("speaker.wav")
        .output_dir("./dist/")
        .device(Device::Auto)
        .build()?;
    settings.set_language(Language::English)?;

    let engine = CoquiEngine::with_settings(settings);
    println!("tts {}", engine.args().join(" "));

    let text = "Hello! This is Coqui TTS driven from Rust. \
                The first run downloads the model, so it can take a while.";

    let synth_start = Instant::now();
    let result = engine.synthesize(text, Path::new("output.wav"), None)?;
    let synth_dur = synth_start.elapsed();

    let audio_duration = result.duration_secs()?;
    println!(
        "Synthesized {:.2}s audio in {:.2?} (attempt {})",
        audio_duration, synth_dur, result.attempts
    );
    println!("Saved to {}", result.output_path.display());

    Ok(())
}
