use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::model::CoquiError;

/// Compute device the tool runs the model on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Pick the best available device when arguments are built.
    #[default]
    Auto,
    Cpu,
    /// NVIDIA GPU, requires a CUDA-enabled torch install.
    Cuda,
    /// Apple silicon GPU.
    Mps,
}

impl Device {
    pub const ALL: &'static [Device] = &[Device::Auto, Device::Cpu, Device::Cuda, Device::Mps];

    pub const fn as_str(self) -> &'static str {
        match self {
            Device::Auto => "auto",
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
            Device::Mps => "mps",
        }
    }

    /// Resolve `Auto` to a concrete device. Other devices are returned as-is.
    ///
    /// Priority: CUDA, then MPS, then CPU.
    pub fn resolve(self, probe: &impl DeviceProbe) -> Device {
        if self != Device::Auto {
            return self;
        }
        if probe.cuda_available() {
            Device::Cuda
        } else if probe.apple_silicon() {
            Device::Mps
        } else {
            Device::Cpu
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = CoquiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoquiError::UnsupportedDevice(s.to_string()))
    }
}

/// Hardware heuristics used to resolve [`Device::Auto`].
///
/// A positive answer doesn't guarantee the tool can actually use the device.
pub trait DeviceProbe {
    fn cuda_available(&self) -> bool;
    fn apple_silicon(&self) -> bool;
}

/// Probes the running machine. Results are computed once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl DeviceProbe for SystemProbe {
    fn cuda_available(&self) -> bool {
        static CUDA: OnceCell<bool> = OnceCell::new();
        *CUDA.get_or_init(|| {
            let found = find_on_path("nvidia-smi");
            log::debug!("nvidia-smi on PATH: {found}");
            found
        })
    }

    fn apple_silicon(&self) -> bool {
        cfg!(all(target_os = "macos", target_arch = "aarch64"))
    }
}

fn find_on_path(program: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| is_executable(&dir, program))
}

fn is_executable(dir: &Path, program: &str) -> bool {
    if dir.join(program).is_file() {
        return true;
    }
    cfg!(windows) && dir.join(format!("{program}.exe")).is_file()
}
