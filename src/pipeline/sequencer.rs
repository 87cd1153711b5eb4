//! Field sequencing and frame accumulation.
//!
//! Both operating modes are built on one primitive, [`FieldSequencer::encode_then_draw`].
//! The only state carried between calls is `SignalFlags::field`.

use crate::{
    control::controller::SignalFlags,
    foundation::core::Framebuffer,
    foundation::error::CrtResult,
    signal::engine::{DrawParams, SignalEngine},
    signal::params::SignalParameters,
    source::adapter::SourceImage,
};

/// Passes run by batch convergence so the decoder's filters settle on a stable picture.
pub const ACCUMULATION_PASSES: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequencerStats {
    /// Total encode-then-draw calls issued.
    pub draw_calls: u64,
    /// Continuous-mode ticks completed.
    pub ticks: u64,
}

#[derive(Clone, Debug, Default)]
pub struct FieldSequencer {
    phase_offset: i32,
    stats: SequencerStats,
}

impl FieldSequencer {
    pub fn new(phase_offset: i32) -> Self {
        Self {
            phase_offset: phase_offset & 3,
            stats: SequencerStats::default(),
        }
    }

    pub fn phase_offset(&self) -> i32 {
        self.phase_offset
    }

    pub fn stats(&self) -> SequencerStats {
        self.stats
    }

    /// One encode followed by one draw with the current field parity.
    pub fn encode_then_draw<E: SignalEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        fb: &mut Framebuffer,
        source: &SourceImage,
        flags: &SignalFlags,
        draw: &DrawParams,
    ) -> CrtResult<()> {
        let params = SignalParameters::build(
            source,
            self.phase_offset,
            flags.color,
            flags.field,
            flags.raw,
        );
        engine.encode(&params)?;
        engine.draw(fb, draw)?;
        self.stats.draw_calls += 1;
        Ok(())
    }

    /// Batch convergence: [`ACCUMULATION_PASSES`] passes, each one call in progressive mode or
    /// a full frame of two fields when interlaced.
    ///
    /// An interlaced pass flips the field between its two calls and once more after the second,
    /// so every pass starts on the same field and the parity is unchanged when this returns.
    #[tracing::instrument(skip_all, fields(progressive = flags.progressive))]
    pub fn converge<E: SignalEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        fb: &mut Framebuffer,
        source: &SourceImage,
        flags: &mut SignalFlags,
        draw: &DrawParams,
    ) -> CrtResult<()> {
        for _ in 0..ACCUMULATION_PASSES {
            self.encode_then_draw(engine, fb, source, flags, draw)?;
            if !flags.progressive {
                flags.field ^= true;
                self.encode_then_draw(engine, fb, source, flags, draw)?;
                flags.field ^= true;
            }
        }
        tracing::debug!(draw_calls = self.stats.draw_calls, "converged");
        Ok(())
    }

    /// Start of a continuous-mode tick: the field always flips.
    pub fn begin_tick(&mut self, flags: &mut SignalFlags) {
        flags.field ^= true;
    }

    /// End of a continuous-mode tick, after control input was handled.
    ///
    /// Interlaced mode flips the field a second time, so across a whole tick the two flips
    /// cancel out and every interlaced tick draws the same field. The second flip is intentional;
    /// switching scan mode mid-stream never resynchronises the field.
    pub fn end_tick(&mut self, flags: &mut SignalFlags) {
        if !flags.progressive {
            flags.field ^= true;
        }
        self.stats.ticks += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sequencer.rs"]
mod tests;
