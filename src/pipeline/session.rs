use crate::{
    control::command::Command,
    control::controller::{Applied, Controls},
    foundation::config::CrtConfig,
    foundation::core::Framebuffer,
    foundation::error::{CrtError, CrtResult},
    pipeline::phosphor::fade_phosphors,
    pipeline::sequencer::{FieldSequencer, SequencerStats},
    signal::engine::{DrawParams, SignalEngine},
    signal::raster::RasterEngine,
    source::adapter::SourceImage,
};

/// One pipeline instance: owns the framebuffer, the engine, the current source frame and all
/// tunable state. Everything is mutated from the tick thread only.
pub struct CrtSession<E: SignalEngine = RasterEngine> {
    engine: E,
    framebuffer: Framebuffer,
    controls: Controls,
    sequencer: FieldSequencer,
    source: Option<SourceImage>,
    converged: bool,
}

impl CrtSession<RasterEngine> {
    /// Session backed by the built-in [`RasterEngine`].
    pub fn with_raster_engine(cfg: &CrtConfig) -> CrtResult<Self> {
        Self::new(RasterEngine::new(cfg.engine), cfg)
    }
}

impl<E: SignalEngine> CrtSession<E> {
    pub fn new(mut engine: E, cfg: &CrtConfig) -> CrtResult<Self> {
        cfg.validate()?;
        let framebuffer = Framebuffer::new(cfg.output.width, cfg.output.height)?;
        engine.init(cfg.output.width, cfg.output.height)?;
        Ok(Self {
            engine,
            framebuffer,
            controls: Controls::new(cfg.controls, cfg.tuning, cfg.flags),
            sequencer: FieldSequencer::new(cfg.phase_offset),
            source: None,
            converged: false,
        })
    }

    /// Replace the current source frame.
    pub fn set_source(&mut self, source: SourceImage) {
        self.source = Some(source);
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn stats(&self) -> SequencerStats {
        self.sequencer.stats()
    }

    /// Dispatch one control command. Effects are picked up by the next encode/draw.
    pub fn apply(&mut self, cmd: Command) -> Applied {
        let applied = self.controls.apply(cmd);
        if applied == Applied::EngineReset {
            self.engine.reset();
        }
        applied
    }

    /// Batch convergence of a single still image. Runs once per session.
    pub fn converge(&mut self) -> CrtResult<()> {
        if self.converged {
            return Err(CrtError::resource(
                "batch convergence already ran for this session",
            ));
        }
        let source = self.source.as_ref().ok_or_else(missing_source)?;
        let draw = DrawParams::from_tuning(&self.controls.tuning);
        self.sequencer.converge(
            &mut self.engine,
            &mut self.framebuffer,
            source,
            &mut self.controls.flags,
            &draw,
        )?;
        self.converged = true;
        Ok(())
    }

    /// One continuous-mode tick: flip field, decay phosphors, encode and draw, then the
    /// interlace flip. Control input for this tick must already be applied.
    pub fn step(&mut self) -> CrtResult<()> {
        let source = self.source.as_ref().ok_or_else(missing_source)?;
        self.sequencer.begin_tick(&mut self.controls.flags);
        fade_phosphors(self.framebuffer.pixels_mut());

        let draw = DrawParams::from_tuning(&self.controls.tuning);
        self.sequencer.encode_then_draw(
            &mut self.engine,
            &mut self.framebuffer,
            source,
            &self.controls.flags,
            &draw,
        )?;
        self.sequencer.end_tick(&mut self.controls.flags);
        Ok(())
    }
}

fn missing_source() -> CrtError {
    CrtError::resource("no source image loaded")
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/session.rs"]
mod tests;
