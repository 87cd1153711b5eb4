use super::*;
use crate::capture::sink::InMemorySink;
use crate::control::command::Command;
use crate::foundation::config::CrtConfig;
use crate::foundation::core::Framebuffer;
use crate::signal::engine::DrawParams;
use crate::signal::params::SignalParameters;
use crate::source::adapter::SourceImage;

/// Loader serving solid frames whose blue channel is the frame index; fails past `last`.
struct Numbered {
    last: u64,
    loads: Vec<u64>,
}

impl FrameLoader for Numbered {
    fn load(&mut self, index: FrameIndex) -> CrtResult<SourceImage> {
        self.loads.push(index.0);
        if index.0 > self.last {
            return Err(CrtError::decode("no such file"));
        }
        SourceImage::solid(1, 1, [0, 0, index.0 as u8])
    }
}

/// Copies the top-left source pixel into the whole framebuffer.
#[derive(Default)]
struct CopyEngine {
    px: u32,
}

impl SignalEngine for CopyEngine {
    fn init(&mut self, _width: u32, _height: u32) -> CrtResult<()> {
        Ok(())
    }

    fn reset(&mut self) {}

    fn encode(&mut self, params: &SignalParameters<'_>) -> CrtResult<()> {
        self.px = params.source.pixel(0, 0);
        Ok(())
    }

    fn draw(&mut self, fb: &mut Framebuffer, _params: &DrawParams) -> CrtResult<()> {
        fb.pixels_mut().fill(self.px);
        Ok(())
    }
}

struct Marker {
    calls: std::rc::Rc<std::cell::Cell<u32>>,
}

impl OverlayCompositor for Marker {
    fn composite(&mut self, _frame: SourceImage, _index: FrameIndex) -> CrtResult<SourceImage> {
        self.calls.set(self.calls.get() + 1);
        SourceImage::solid(1, 1, [255, 0, 0])
    }
}

fn session(initial: u64, playing: bool) -> CrtSession<CopyEngine> {
    let mut cfg = CrtConfig::default();
    cfg.output.width = 2;
    cfg.output.height = 1;
    cfg.controls.initial_frame = initial;
    let mut s = CrtSession::new(CopyEngine::default(), &cfg).unwrap();
    s.controls_mut().enable_playback(playing);
    s
}

fn sequencer(last: u64, overlay_until: u64) -> CaptureSequencer<Numbered, InMemorySink> {
    CaptureSequencer::new(
        Numbered {
            last,
            loads: Vec::new(),
        },
        InMemorySink::new(),
        CaptureConfig { overlay_until },
    )
}

#[test]
fn idle_sequencer_does_nothing() {
    let mut s = session(1, false);
    let mut cap = sequencer(10, 0);
    assert_eq!(cap.state(&s), CaptureState::Idle);
    assert_eq!(cap.tick(&mut s).unwrap(), TickOutcome::Idle);
    assert!(cap.sink().frames().is_empty());
    assert_eq!(s.controls().playback.current, FrameIndex(1));
}

#[test]
fn playing_captures_consecutive_frames_without_gaps() {
    let mut s = session(3, true);
    let mut cap = sequencer(10, 0);
    for expected in 3..6 {
        assert_eq!(
            cap.tick(&mut s).unwrap(),
            TickOutcome::Captured(FrameIndex(expected))
        );
    }
    cap.finish().unwrap();

    let frames = cap.sink().frames();
    let indices: Vec<u64> = frames.iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, vec![3, 4, 5]);
    // The framebuffer written for frame N is derived from source frame N.
    for (idx, px) in frames {
        assert_eq!(px[0] & 0xff, (idx.0 as u32) & 0xff);
    }
    assert_eq!(s.controls().playback.current, FrameIndex(6));
    assert!(cap.sink().ended());
    assert_eq!(cap.captured(), 3);
}

#[test]
fn load_failure_stops_playback_and_names_the_frame() {
    let mut s = session(1, true);
    let mut cap = sequencer(2, 0);
    cap.tick(&mut s).unwrap();
    cap.tick(&mut s).unwrap();

    let err = cap.tick(&mut s).unwrap_err();
    assert_eq!(err.failed_frame(), Some(3));
    assert_eq!(cap.state(&s), CaptureState::Idle);
    assert_eq!(s.controls().playback.current, FrameIndex(3));
    assert_eq!(cap.sink().frames().len(), 2);

    // Stopped: further ticks neither load nor write.
    assert_eq!(cap.tick(&mut s).unwrap(), TickOutcome::Idle);
    assert_eq!(cap.loader.loads, vec![1, 2, 3]);
}

#[test]
fn overlay_only_applies_below_threshold() {
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut s = session(1, true);
    let mut cap = sequencer(10, 3).with_overlay(Box::new(Marker {
        calls: calls.clone(),
    }));
    for _ in 0..4 {
        cap.tick(&mut s).unwrap();
    }
    assert_eq!(calls.get(), 2);
    let frames = cap.sink().frames();
    assert_eq!(frames[0].1[0], 0x00ff_0000);
    assert_eq!(frames[1].1[0], 0x00ff_0000);
    assert_eq!(frames[2].1[0], 0x0000_0003);
}

#[test]
fn overlay_is_never_invoked_when_threshold_is_zero() {
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut s = session(1, true);
    let mut cap = sequencer(10, 0).with_overlay(Box::new(Marker {
        calls: calls.clone(),
    }));
    cap.tick(&mut s).unwrap();
    assert_eq!(calls.get(), 0);
}

#[test]
fn pause_and_step_between_ticks() {
    let mut s = session(1, true);
    let mut cap = sequencer(10, 0);
    cap.tick(&mut s).unwrap();
    s.apply(Command::TogglePlay);
    assert_eq!(cap.tick(&mut s).unwrap(), TickOutcome::Idle);
    s.apply(Command::StepForward);
    s.apply(Command::TogglePlay);
    assert_eq!(
        cap.tick(&mut s).unwrap(),
        TickOutcome::Captured(FrameIndex(3))
    );
}
