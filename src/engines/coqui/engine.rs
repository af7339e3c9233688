use std::fs;
use std::path::{Component, Path, PathBuf};

use super::args::{self, OUT_PATH, TEXT};
use super::config::{Config, Settings, SettingsBuilder};
use super::device::{DeviceProbe, SystemProbe};
use super::model::{CoquiError, ModelIdentifier};
use super::presets;
use super::process::{run_with_retries, CancellationToken, CommandRunner, ProcessRunner};
use crate::{SynthesisEngine, SynthesisResult};

/// Per-call parameters for [`CoquiEngine`].
#[derive(Debug, Clone, Default)]
pub struct CoquiSynthesisParams {
    /// Token checked before every attempt and while the tool runs.
    pub cancellation: Option<CancellationToken>,
}

/// Synthesis engine backed by the Coqui `tts` executable.
///
/// The runner and device probe are pluggable so the engine can be driven
/// without the tool installed.
#[derive(Debug, Clone)]
pub struct CoquiEngine<R = ProcessRunner, P = SystemProbe> {
    settings: Settings,
    runner: R,
    probe: P,
}

impl CoquiEngine {
    /// Engine with default settings (XTTS v2, device picked automatically).
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            runner: ProcessRunner,
            probe: SystemProbe,
        }
    }

    pub fn from_config(config: Config) -> Result<Self, CoquiError> {
        Ok(Self::with_settings(config.into_settings()?))
    }

    pub fn xtts_v2() -> Result<Self, CoquiError> {
        Self::with_model(presets::XTTS_V2)
    }

    pub fn xtts_v1() -> Result<Self, CoquiError> {
        Self::with_model(presets::XTTS_V1)
    }

    pub fn your_tts() -> Result<Self, CoquiError> {
        Self::with_model(presets::YOUR_TTS)
    }

    pub fn bark() -> Result<Self, CoquiError> {
        Self::with_model(presets::BARK)
    }

    fn with_model(model: ModelIdentifier) -> Result<Self, CoquiError> {
        let settings = SettingsBuilder::default().model(model).build()?;
        Ok(Self::with_settings(settings))
    }
}

impl Default for CoquiEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> CoquiEngine<R, P>
where
    R: CommandRunner,
    P: DeviceProbe,
{
    /// Engine with an explicit runner and probe.
    pub fn with_parts(settings: Settings, runner: R, probe: P) -> Self {
        Self {
            settings,
            runner,
            probe,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings are validated by their own setters.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Model, device and speaker flags for the current settings.
    pub fn args(&self) -> Vec<String> {
        args::to_args(&self.settings, &self.probe)
    }

    /// Convert `source` into the voice of `target` using the configured voice
    /// conversion model, writing to `file_name` under the output directory.
    pub fn convert_voice(
        &self,
        source: &Path,
        target: &Path,
        file_name: &Path,
        params: Option<CoquiSynthesisParams>,
    ) -> Result<SynthesisResult, CoquiError> {
        let mut args = args::voice_conversion_args(&self.settings, &self.probe, source, target)?;
        let output_path = self.prepare_output(file_name)?;
        args.push(OUT_PATH.to_string());
        args.push(output_path.to_string_lossy().into_owned());

        log::info!(
            "Converting {} to the voice of {}",
            source.display(),
            target.display()
        );
        self.execute(args, output_path, params)
    }

    fn prepare_output(&self, file_name: &Path) -> Result<PathBuf, CoquiError> {
        if file_name.as_os_str().is_empty() {
            return Err(CoquiError::InvalidConfig(
                "output file name cannot be empty".to_string(),
            ));
        }

        // The file must stay inside the output directory.
        let escapes = file_name
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(CoquiError::InvalidConfig(format!(
                "output file name must be relative to the output directory: {}",
                file_name.display()
            )));
        }

        let output_path = self.settings.output_dir().join(file_name);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if output_path.exists() {
            return Err(CoquiError::OutputExists(output_path));
        }
        Ok(output_path)
    }

    fn execute(
        &self,
        args: Vec<String>,
        output_path: PathBuf,
        params: Option<CoquiSynthesisParams>,
    ) -> Result<SynthesisResult, CoquiError> {
        let params = params.unwrap_or_default();
        let program = self.settings.program();
        log::debug!("{program} {}", args.join(" "));

        let (tool_output, attempts) = run_with_retries(
            &self.runner,
            program,
            &args,
            self.settings.max_retries(),
            params.cancellation.as_ref(),
        )?;
        log::debug!("{}", String::from_utf8_lossy(&tool_output));

        log::info!(
            "Wrote {} after {attempts} attempt(s)",
            output_path.display()
        );
        Ok(SynthesisResult {
            output_path,
            tool_output,
            attempts,
        })
    }
}

impl<R, P> SynthesisEngine for CoquiEngine<R, P>
where
    R: CommandRunner,
    P: DeviceProbe,
{
    type SynthesisParams = CoquiSynthesisParams;
    type Error = CoquiError;

    fn synthesize(
        &self,
        text: &str,
        file_name: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Self::Error> {
        if text.trim().is_empty() {
            return Err(CoquiError::EmptyText);
        }

        let output_path = self.prepare_output(file_name)?;
        let mut args = self.args();
        args.extend([
            TEXT.to_string(),
            text.to_string(),
            OUT_PATH.to_string(),
            output_path.to_string_lossy().into_owned(),
        ]);

        log::info!(
            "Synthesizing {} chars with {}",
            text.chars().count(),
            self.settings.model()
        );
        self.execute(args, output_path, params)
    }

    fn synthesize_file(
        &self,
        input: &Path,
        file_name: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Self::Error> {
        if input.as_os_str().is_empty() {
            return Err(CoquiError::InvalidConfig(
                "input file path cannot be empty".to_string(),
            ));
        }
        let text = fs::read_to_string(input)?;
        self.synthesize(&text, file_name, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::coqui::device::tests::FixedProbe;
    use crate::engines::coqui::device::Device;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl CommandRunner for Recorder {
        fn run(
            &self,
            program: &str,
            args: &[String],
            _cancel: Option<&CancellationToken>,
        ) -> Result<Vec<u8>, CoquiError> {
            self.calls.borrow_mut().push((program.to_string(), args.to_vec()));
            Ok(b" > Done.\n".to_vec())
        }
    }

    fn engine(dir: &Path) -> CoquiEngine<Recorder, FixedProbe> {
        let settings = SettingsBuilder::default()
            .device(Device::Cpu)
            .output_dir(dir)
            .speaker_sample("ref.wav")
            .build()
            .unwrap();
        CoquiEngine::with_parts(settings, Recorder::default(), FixedProbe::default())
    }

    #[test]
    fn appends_text_and_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path());

        let result = engine.synthesize("Hello there", Path::new("a.wav"), None).unwrap();

        let calls = engine.runner().calls.borrow();
        assert_eq!(calls.len(), 1);
        let (program, args) = &calls[0];
        assert_eq!(program, "tts");
        assert!(args.starts_with(&engine.args()));
        let tail = &args[args.len() - 4..];
        assert_eq!(tail[0], "--text");
        assert_eq!(tail[1], "Hello there");
        assert_eq!(tail[2], "--out_path");
        assert_eq!(Path::new(&tail[3]), dir.path().join("a.wav"));
        assert_eq!(result.output_path, dir.path().join("a.wav"));
        assert_eq!(result.attempts, 1);
    }

    #[test]
    fn rejects_blank_text_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path());

        let err = engine.synthesize("  \n", Path::new("a.wav"), None).unwrap_err();
        assert!(matches!(err, CoquiError::EmptyText));
        assert!(engine.runner().calls.borrow().is_empty());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("taken.wav"), b"").unwrap();
        let engine = engine(dir.path());

        let err = engine.synthesize("Hi", Path::new("taken.wav"), None).unwrap_err();
        assert!(matches!(err, CoquiError::OutputExists(_)));
        assert!(engine.runner().calls.borrow().is_empty());
    }

    #[test]
    fn output_names_cannot_leave_the_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let engine = engine(&out);
        let outside = dir.path().join("escaped.wav");

        let names = [
            Path::new("../escaped.wav"),
            outside.as_path(),
            Path::new("a/../../x.wav"),
        ];
        for name in names {
            let err = engine.synthesize("Hi", name, None).unwrap_err();
            assert!(matches!(err, CoquiError::InvalidConfig(_)), "{}", name.display());
        }
        assert!(engine.runner().calls.borrow().is_empty());

        let result = engine.synthesize("Hi", Path::new("./takes/one.wav"), None).unwrap();
        assert!(result.output_path.starts_with(&out));
        assert!(out.join("takes").is_dir());
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("wav");
        let engine = engine(&nested);

        engine.synthesize("Hi", Path::new("a.wav"), None).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn convert_voice_requires_a_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(dir.path());

        let err = engine
            .convert_voice(Path::new("in.wav"), Path::new("me.wav"), Path::new("o.wav"), None)
            .unwrap_err();
        assert!(matches!(err, CoquiError::InvalidConfig(_)));

        engine.settings_mut().set_voice_conversion(presets::FREEVC24_VCTK).unwrap();
        engine
            .convert_voice(Path::new("in.wav"), Path::new("me.wav"), Path::new("o.wav"), None)
            .unwrap();

        let calls = engine.runner().calls.borrow();
        let args = &calls[0].1;
        assert!(args.contains(&"--source_wav".to_string()));
        assert!(!args.contains(&"--text".to_string()));
        assert_eq!(args[args.len() - 2], "--out_path");
    }

    #[test]
    fn empty_input_path_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path());

        let err = engine.synthesize_file(Path::new(""), Path::new("a.wav"), None).unwrap_err();
        assert!(matches!(err, CoquiError::InvalidConfig(_)));
    }

    #[test]
    fn presets_build() {
        assert_eq!(CoquiEngine::xtts_v1().unwrap().settings().model(), &presets::XTTS_V1);
        assert_eq!(CoquiEngine::bark().unwrap().settings().model(), &presets::BARK);
        assert_eq!(CoquiEngine::new().settings().model(), &presets::XTTS_V2);
    }
}
