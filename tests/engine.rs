//! End-to-end tests for the Coqui engine through the public API.
//!
//! A fake runner stands in for the `tts` executable and writes a short WAV
//! file to the requested `--out_path`.

use std::cell::Cell;
use std::path::Path;

use coqui_rs::engines::coqui::{
    presets, CancellationToken, CommandRunner, Config, CoquiEngine, CoquiError,
    CoquiSynthesisParams, Device, DeviceProbe, Language, SettingsBuilder,
};
use coqui_rs::SynthesisEngine;

struct NoGpu;

impl DeviceProbe for NoGpu {
    fn cuda_available(&self) -> bool {
        false
    }

    fn apple_silicon(&self) -> bool {
        false
    }
}

/// Fails `failures` times, then writes half a second of silence.
struct FakeTts {
    failures: u32,
    calls: Cell<u32>,
}

impl FakeTts {
    fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: Cell::new(0),
        }
    }
}

impl CommandRunner for FakeTts {
    fn run(
        &self,
        _program: &str,
        args: &[String],
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<u8>, CoquiError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);

        if cancel.is_some_and(|t| t.is_cancelled()) {
            return Err(CoquiError::Cancelled);
        }
        if call <= self.failures {
            return Err(CoquiError::ToolFailed {
                code: Some(1),
                output: "RuntimeError: CUDA out of memory".to_string(),
            });
        }

        let out = args
            .iter()
            .position(|a| a == "--out_path")
            .map(|i| &args[i + 1])
            .expect("--out_path missing");
        write_silence(Path::new(out), 24000, 12000);
        Ok(format!(" > Saving output to {out}\n").into_bytes())
    }
}

fn write_silence(path: &Path, sample_rate: u32, samples: usize) {
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

fn engine(dir: &Path, retries: u32, failures: u32) -> CoquiEngine<FakeTts, NoGpu> {
    let settings = SettingsBuilder::default()
        .output_dir(dir)
        .max_retries(retries)
        .speaker_sample("speaker.wav")
        .build()
        .unwrap();
    CoquiEngine::with_parts(settings, FakeTts::new(failures), NoGpu)
}

#[test]
fn synthesizes_a_wav_file() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path(), 3, 0);

    let result = engine.synthesize("Hello, world!", Path::new("hello.wav"), None).unwrap();

    assert_eq!(result.output_path, dir.path().join("hello.wav"));
    assert_eq!(result.attempts, 1);
    assert_eq!(result.wav_spec().unwrap().sample_rate, 24000);
    assert!((result.duration_secs().unwrap() - 0.5).abs() < 1e-9);
    assert!(result.tool_output_lossy().contains("Saving output"));
}

#[test]
fn retries_until_success() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path(), 3, 2);

    let result = engine.synthesize("Again", Path::new("again.wav"), None).unwrap();

    assert_eq!(result.attempts, 3);
    assert_eq!(engine.runner().calls.get(), 3);
}

#[test]
fn stops_after_max_retries() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path(), 2, 10);

    let err = engine.synthesize("Never", Path::new("never.wav"), None).unwrap_err();

    assert!(matches!(err, CoquiError::ToolFailed { code: Some(1), .. }));
    assert_eq!(engine.runner().calls.get(), 2);
    assert!(!dir.path().join("never.wav").exists());
}

#[test]
fn cancelled_before_start() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path(), 3, 0);
    let token = CancellationToken::new();
    token.cancel();
    let params = CoquiSynthesisParams {
        cancellation: Some(token),
    };

    let err = engine.synthesize("Stop", Path::new("stop.wav"), Some(params)).unwrap_err();

    assert!(matches!(err, CoquiError::Cancelled));
    assert_eq!(engine.runner().calls.get(), 0);
}

#[test]
fn existing_output_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path(), 3, 0);

    engine.synthesize("First", Path::new("same.wav"), None).unwrap();
    let err = engine.synthesize("Second", Path::new("same.wav"), None).unwrap_err();

    assert!(matches!(err, CoquiError::OutputExists(_)));
    assert_eq!(engine.runner().calls.get(), 1);
}

#[test]
fn synthesizes_from_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("script.txt");
    std::fs::write(&input, "Read from a file.").unwrap();
    let engine = engine(&dir.path().join("out"), 3, 0);

    let result = engine.synthesize_file(&input, Path::new("file.wav"), None).unwrap();
    assert!(result.output_path.exists());

    let err = engine
        .synthesize_file(&dir.path().join("missing.txt"), Path::new("x.wav"), None)
        .unwrap_err();
    assert!(matches!(err, CoquiError::Io(_)));
}

#[test]
fn config_file_drives_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coqui.json");
    std::fs::write(
        &path,
        r#"{
            "model": "tts_models/en/vctk/vits",
            "speakerIdx": "p225",
            "device": "cpu",
            "vocoder": "vocoder_models/en/ljspeech/hifigan_v2"
        }"#,
    )
    .unwrap();

    let engine = CoquiEngine::from_config(Config::from_json_file(&path).unwrap()).unwrap();

    assert_eq!(
        engine.args(),
        vec![
            "--device",
            "cpu",
            "--model_name",
            "tts_models/en/vctk/vits",
            "--vocoder_name",
            "vocoder_models/en/ljspeech/hifigan_v2",
            "--speaker_idx",
            "p225",
        ]
    );
}

#[test]
fn language_switch_reaches_the_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine(dir.path(), 1, 0);
    engine.settings_mut().set_device(Device::Cpu);
    engine.settings_mut().set_language(Language::Spanish).unwrap();

    let args = engine.args();
    let idx = args.iter().position(|a| a == "--language_idx").unwrap();
    assert_eq!(args[idx + 1], "es");

    assert!(engine.settings_mut().set_model(presets::VITS_VCTK).is_ok());
    assert!(engine.settings_mut().set_language(Language::Spanish).is_err());
}
