use crate::{
    control::command::Command,
    foundation::core::FrameIndex,
    foundation::error::{CrtError, CrtResult},
};

/// Integer picture/sync knobs mirrored into the signal engine on every draw.
///
/// Only `noise`, `hsync` and `vsync` are clamped (to `>= 0`); everything else is free.
/// Every knob saturates at the `i32` limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TuningState {
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub black_point: i32,
    pub white_point: i32,
    pub hsync: i32,
    pub vsync: i32,
    pub roll: i32,
    pub noise: i32,
}

impl Default for TuningState {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 180,
            saturation: 10,
            black_point: 0,
            white_point: 100,
            hsync: 0,
            vsync: 0,
            roll: 0,
            noise: 0,
        }
    }
}

impl TuningState {
    pub fn validate(&self) -> CrtResult<()> {
        if self.noise < 0 {
            return Err(CrtError::config("noise amplitude must be >= 0"));
        }
        if self.hsync < 0 || self.vsync < 0 {
            return Err(CrtError::config("sync offsets must be >= 0"));
        }
        Ok(())
    }
}

/// Per-encode signal switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SignalFlags {
    pub color: bool,
    /// Field parity; `false` is the even field.
    pub field: bool,
    pub progressive: bool,
    pub raw: bool,
}

impl Default for SignalFlags {
    fn default() -> Self {
        Self {
            color: true,
            field: false,
            progressive: true,
            raw: false,
        }
    }
}

/// Transport state of a numbered frame sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub current: FrameIndex,
    pub playing: bool,
}

/// Step sizes and initial values for [`Controls`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Increment applied by `IncreaseNoise`/`DecreaseNoise`.
    pub noise_step: i32,
    /// Frame index restored by `Reset` and used at startup.
    pub initial_frame: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            noise_step: 1,
            initial_frame: FrameIndex::FIRST.0,
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> CrtResult<()> {
        if self.noise_step <= 0 {
            return Err(CrtError::config("noise_step must be > 0"));
        }
        if self.initial_frame < FrameIndex::FIRST.0 {
            return Err(CrtError::config("initial_frame must be >= 1"));
        }
        Ok(())
    }
}

/// What the caller has to do after a command was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// Flags were reset; the engine's own defaults must be restored too.
    EngineReset,
    /// Transport command while no sequence is attached.
    Ignored,
}

/// Mutable tuning, flag and transport state, changed only through [`Controls::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub tuning: TuningState,
    pub flags: SignalFlags,
    pub playback: PlaybackState,
    playback_enabled: bool,
    config: ControlConfig,
}

impl Controls {
    pub fn new(config: ControlConfig, tuning: TuningState, flags: SignalFlags) -> Self {
        Self {
            tuning,
            flags,
            playback: PlaybackState {
                current: FrameIndex(config.initial_frame.max(FrameIndex::FIRST.0)),
                playing: false,
            },
            playback_enabled: false,
            config,
        }
    }

    /// Accept transport commands from now on.
    pub fn enable_playback(&mut self, playing: bool) {
        self.playback_enabled = true;
        self.playback.playing = playing;
    }

    pub fn playback_enabled(&self) -> bool {
        self.playback_enabled
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Apply one command. Takes effect on the next encode/draw, never mid-call.
    pub fn apply(&mut self, cmd: Command) -> Applied {
        if cmd.is_transport() && !self.playback_enabled {
            tracing::debug!(?cmd, "transport command ignored without a sequence");
            return Applied::Ignored;
        }

        let t = &mut self.tuning;
        let noise_step = self.config.noise_step;
        match cmd {
            Command::IncreaseBrightness => t.brightness = t.brightness.saturating_add(1),
            Command::DecreaseBrightness => t.brightness = t.brightness.saturating_sub(1),
            Command::IncreaseContrast => t.contrast = t.contrast.saturating_add(1),
            Command::DecreaseContrast => t.contrast = t.contrast.saturating_sub(1),
            Command::IncreaseSaturation => t.saturation = t.saturation.saturating_add(1),
            Command::DecreaseSaturation => t.saturation = t.saturation.saturating_sub(1),
            Command::IncreaseBlackPoint => t.black_point = t.black_point.saturating_add(1),
            Command::DecreaseBlackPoint => t.black_point = t.black_point.saturating_sub(1),
            Command::IncreaseWhitePoint => t.white_point = t.white_point.saturating_add(1),
            Command::DecreaseWhitePoint => t.white_point = t.white_point.saturating_sub(1),
            Command::IncreaseHorizontalSync => t.hsync = t.hsync.saturating_add(1),
            Command::DecreaseHorizontalSync => t.hsync = t.hsync.saturating_sub(1).max(0),
            Command::IncreaseVerticalSync => t.vsync = t.vsync.saturating_add(1),
            Command::DecreaseVerticalSync => t.vsync = t.vsync.saturating_sub(1).max(0),
            Command::RollUp => t.roll = t.roll.saturating_add(1),
            Command::RollDown => t.roll = t.roll.saturating_sub(1),
            Command::IncreaseNoise => t.noise = t.noise.saturating_add(noise_step),
            Command::DecreaseNoise => t.noise = t.noise.saturating_sub(noise_step).max(0),
            Command::ToggleColor => self.flags.color ^= true,
            Command::ToggleField => self.flags.field ^= true,
            Command::ToggleProgressive => self.flags.progressive ^= true,
            Command::ToggleRaw => self.flags.raw ^= true,
            Command::Reset => {
                self.flags = SignalFlags::default();
                self.playback.current = FrameIndex(self.config.initial_frame);
                tracing::debug!(flags = ?self.flags, frame = %self.playback.current, "reset");
                return Applied::EngineReset;
            }
            Command::TogglePlay => self.playback.playing ^= true,
            Command::StepForward => self.playback.current = self.playback.current.next(),
            Command::StepBackward => {
                self.playback.current = self.playback.current.prev_clamped();
            }
        }
        tracing::debug!(?cmd, tuning = ?self.tuning, flags = ?self.flags, "control applied");
        Applied::Updated
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/controller.rs"]
mod tests;
