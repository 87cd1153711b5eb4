//! Tick driver and the presentation-surface boundary.
//!
//! One tick, in strict order: poll the presenter, stop if asked (before doing any work), apply
//! the tick's commands, run one pipeline step, present the framebuffer.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    capture::sequencer::{CaptureSequencer, TickOutcome},
    capture::sink::FrameSink,
    control::command::Command,
    foundation::core::Framebuffer,
    foundation::error::{CrtError, CrtResult},
    pipeline::session::CrtSession,
    signal::engine::SignalEngine,
    source::loader::FrameLoader,
};

/// Input gathered by the presenter for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Poll {
    pub commands: Vec<Command>,
    pub stop: bool,
}

/// Display surface plus its event queue.
pub trait Presenter {
    /// Drain pending input. Called once per tick before any pipeline work.
    fn poll(&mut self) -> CrtResult<Poll>;
    /// Show the finished framebuffer.
    fn present(&mut self, frame: &Framebuffer) -> CrtResult<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub captured: u64,
}

fn drive<E, P>(
    session: &mut CrtSession<E>,
    presenter: &mut P,
    mut step: impl FnMut(&mut CrtSession<E>, &mut LoopStats) -> CrtResult<()>,
) -> CrtResult<LoopStats>
where
    E: SignalEngine,
    P: Presenter + ?Sized,
{
    let mut stats = LoopStats::default();
    loop {
        let poll = presenter.poll()?;
        if poll.stop {
            break;
        }
        for cmd in poll.commands {
            session.apply(cmd);
        }
        step(session, &mut stats)?;
        presenter.present(session.framebuffer())?;
        stats.ticks += 1;
    }
    tracing::debug!(ticks = stats.ticks, captured = stats.captured, "tick loop stopped");
    Ok(stats)
}

/// Interactive loop over the session's current source.
pub fn run_loop<E, P>(session: &mut CrtSession<E>, presenter: &mut P) -> CrtResult<LoopStats>
where
    E: SignalEngine,
    P: Presenter + ?Sized,
{
    drive(session, presenter, |s, _| s.step())
}

/// Playback loop: captures while playing, otherwise keeps ticking the last source frame.
pub fn run_capture_loop<E, P, L, S>(
    session: &mut CrtSession<E>,
    presenter: &mut P,
    capture: &mut CaptureSequencer<L, S>,
) -> CrtResult<LoopStats>
where
    E: SignalEngine,
    P: Presenter + ?Sized,
    L: FrameLoader,
    S: FrameSink,
{
    let playing = session.controls().playback.playing;
    session.controls_mut().enable_playback(playing);
    let result = drive(session, presenter, |s, stats| {
        match capture.tick(s)? {
            TickOutcome::Captured(_) => stats.captured += 1,
            TickOutcome::Idle if s.source().is_some() => s.step()?,
            TickOutcome::Idle => {}
        }
        Ok(())
    });
    // Frames already written stay valid; close the sink either way. A loop error wins.
    let finished = capture.finish();
    let stats = result?;
    finished?;
    Ok(stats)
}

/// One scripted tick entry.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEntry {
    pub tick: u64,
    pub commands: Vec<Command>,
}

/// Headless presenter: replays scripted commands and stops after a fixed number of ticks.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPresenter {
    script: BTreeMap<u64, Vec<Command>>,
    max_ticks: u64,
    tick: u64,
    presented: u64,
}

impl ScriptedPresenter {
    pub fn new(max_ticks: u64) -> Self {
        Self {
            max_ticks,
            ..Self::default()
        }
    }

    pub fn with_script(mut self, entries: Vec<ScriptEntry>) -> Self {
        for e in entries {
            self.script.entry(e.tick).or_default().extend(e.commands);
        }
        self
    }

    /// Load a JSON array of `{ "tick": N, "commands": [...] }` entries.
    pub fn script_from_path(path: &Path) -> CrtResult<Vec<ScriptEntry>> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        serde_json::from_str(&s).map_err(|e| CrtError::config(format!("invalid script json: {e}")))
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Presenter for ScriptedPresenter {
    fn poll(&mut self) -> CrtResult<Poll> {
        if self.tick >= self.max_ticks {
            return Ok(Poll {
                commands: Vec::new(),
                stop: true,
            });
        }
        let commands = self.script.remove(&self.tick).unwrap_or_default();
        self.tick += 1;
        Ok(Poll {
            commands,
            stop: false,
        })
    }

    fn present(&mut self, _frame: &Framebuffer) -> CrtResult<()> {
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/present.rs"]
mod tests;
