//! Frame-indexed capture/export.
//!
//! While playing, each tick loads frame `current`, optionally burns in the overlay, runs one
//! continuous pipeline tick, hands the framebuffer to the sink and advances `current`. Any
//! failure stops playback so the output never has gaps or misnumbered frames.

use crate::{
    capture::overlay::OverlayCompositor,
    capture::sink::FrameSink,
    foundation::core::FrameIndex,
    foundation::error::{CrtError, CrtResult},
    pipeline::session::CrtSession,
    signal::engine::SignalEngine,
    source::loader::FrameLoader,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// The overlay is composited onto frames whose index is below this; 0 disables it.
    pub overlay_until: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing was loaded or written.
    Idle,
    Captured(FrameIndex),
}

pub struct CaptureSequencer<L: FrameLoader, S: FrameSink> {
    loader: L,
    sink: S,
    overlay: Option<Box<dyn OverlayCompositor>>,
    config: CaptureConfig,
    begun: bool,
    captured: u64,
}

impl<L: FrameLoader, S: FrameSink> CaptureSequencer<L, S> {
    pub fn new(loader: L, sink: S, config: CaptureConfig) -> Self {
        Self {
            loader,
            sink,
            overlay: None,
            config,
            begun: false,
            captured: 0,
        }
    }

    pub fn with_overlay(mut self, overlay: Box<dyn OverlayCompositor>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn captured(&self) -> u64 {
        self.captured
    }

    pub fn state<E: SignalEngine>(&self, session: &CrtSession<E>) -> CaptureState {
        if session.controls().playback.playing {
            CaptureState::Playing
        } else {
            CaptureState::Idle
        }
    }

    fn overlay_active(&self, idx: FrameIndex) -> bool {
        self.overlay.is_some() && idx.0 < self.config.overlay_until
    }

    /// Run one capture tick. Control input for the tick must already be applied.
    #[tracing::instrument(skip_all, fields(frame = %session.controls().playback.current))]
    pub fn tick<E: SignalEngine>(&mut self, session: &mut CrtSession<E>) -> CrtResult<TickOutcome> {
        if self.state(session) == CaptureState::Idle {
            return Ok(TickOutcome::Idle);
        }
        match self.capture_current(session) {
            Ok(idx) => Ok(TickOutcome::Captured(idx)),
            Err(e) => {
                session.controls_mut().playback.playing = false;
                tracing::warn!(error = %e, "capture stopped");
                Err(e)
            }
        }
    }

    fn capture_current<E: SignalEngine>(&mut self, session: &mut CrtSession<E>) -> CrtResult<FrameIndex> {
        let idx = session.controls().playback.current;

        let mut frame = self.loader.load(idx).map_err(|e| match e {
            CrtError::Decode { reason, .. } => CrtError::decode_frame(idx.0, reason),
            other => CrtError::decode_frame(idx.0, other.to_string()),
        })?;

        if self.overlay_active(idx)
            && let Some(overlay) = self.overlay.as_mut()
        {
            frame = overlay.composite(frame, idx)?;
        }

        session.set_source(frame);
        session.step()?;

        if !self.begun {
            let fb = session.framebuffer();
            self.sink.begin(fb.width(), fb.height())?;
            self.begun = true;
        }
        self.sink.push_frame(idx, session.framebuffer())?;

        session.controls_mut().playback.current = idx.next();
        self.captured += 1;
        Ok(idx)
    }

    /// Close the sink if anything was written.
    pub fn finish(&mut self) -> CrtResult<()> {
        if self.begun {
            self.sink.end()?;
            self.begun = false;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sequencer.rs"]
mod tests;
