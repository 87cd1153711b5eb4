use crate::{
    control::controller::TuningState,
    foundation::core::Framebuffer,
    foundation::error::CrtResult,
    signal::params::SignalParameters,
};

/// Picture controls mirrored from [`TuningState`] into the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Picture {
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub black_point: i32,
    pub white_point: i32,
}

/// Arguments of one `draw` call. Noise and sync offsets are already clamped to `>= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawParams {
    pub noise: i32,
    pub roll: i32,
    pub vsync: i32,
    pub hsync: i32,
    pub picture: Picture,
}

impl DrawParams {
    pub fn from_tuning(t: &TuningState) -> Self {
        Self {
            noise: t.noise.max(0),
            roll: t.roll,
            vsync: t.vsync.max(0),
            hsync: t.hsync.max(0),
            picture: Picture {
                brightness: t.brightness,
                contrast: t.contrast,
                saturation: t.saturation,
                black_point: t.black_point,
                white_point: t.white_point,
            },
        }
    }
}

/// Analog signal encode/decode engine.
///
/// The pipeline owns the framebuffer and lends it to `draw`; `init` fixes the output size the
/// engine must accept from then on.
pub trait SignalEngine {
    /// Prepare for `width x height` output. Called once before any draw.
    fn init(&mut self, width: u32, height: u32) -> CrtResult<()>;

    /// Restore the engine's internal defaults.
    fn reset(&mut self);

    /// Modulate a source frame into the engine's internal signal. No visible output.
    fn encode(&mut self, params: &SignalParameters<'_>) -> CrtResult<()>;

    /// Demodulate the last encoded signal into `fb`, blending with what is already there.
    fn draw(&mut self, fb: &mut Framebuffer, params: &DrawParams) -> CrtResult<()>;
}
