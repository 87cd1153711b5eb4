use std::path::Path;

use anyhow::Context as _;

use crate::{
    capture::sequencer::CaptureConfig,
    control::controller::{ControlConfig, SignalFlags, TuningState},
    foundation::error::{CrtError, CrtResult},
    signal::raster::RasterEngineConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 832,
            height: 624,
        }
    }
}

/// Full session configuration. Every section is optional in JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CrtConfig {
    pub output: OutputConfig,
    pub tuning: TuningState,
    pub flags: SignalFlags,
    pub controls: ControlConfig,
    pub capture: CaptureConfig,
    pub engine: RasterEngineConfig,
    /// Colorburst phase offset; only its value mod 4 matters.
    pub phase_offset: i32,
}

impl CrtConfig {
    pub fn from_json_str(s: &str) -> CrtResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| CrtError::config(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> CrtResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> CrtResult<()> {
        if self.output.width == 0 || self.output.height == 0 {
            return Err(CrtError::config(format!(
                "output dimensions must be non-zero (got {}x{})",
                self.output.width, self.output.height
            )));
        }
        self.tuning.validate()?;
        self.controls.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
