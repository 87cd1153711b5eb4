//! ntscrt emulates an analog CRT television showing broadcast video.
//!
//! A source image is adapted into engine layout, pushed through an NTSC-style signal engine
//! field by field, and composited into a persistent framebuffer with phosphor afterglow.
//!
//! # Pipeline overview
//!
//! 1. **Adapt**: decoded image -> [`SourceImage`] (packed `0x00RRGGBB`)
//! 2. **Parameters**: flags + colorburst phase -> [`SignalParameters`]
//! 3. **Sequence**: [`FieldSequencer`] drives encode-then-draw, either as a fixed batch
//!    convergence or one call per tick
//! 4. **Persistence**: [`fade_phosphors`] decays the framebuffer before every continuous draw
//! 5. **Control**: [`Command`]s mutate tuning and transport state between ticks
//! 6. **Capture** (optional): [`CaptureSequencer`] loads, overlays, processes and writes
//!    numbered frames
//!
//! All state lives in a [`CrtSession`]; nothing is global, and everything is mutated from the
//! tick thread only.
#![forbid(unsafe_code)]

pub mod capture;
pub mod control;
pub mod foundation;
pub mod pipeline;
pub mod present;
pub mod signal;
pub mod source;

pub use capture::overlay::{ImageOverlay, OverlayCompositor};
pub use capture::sequencer::{CaptureConfig, CaptureSequencer, CaptureState, TickOutcome};
pub use capture::sink::{FrameSink, ImageSequenceSink, InMemorySink, write_framebuffer};
pub use control::command::Command;
pub use control::controller::{
    Applied, ControlConfig, Controls, PlaybackState, SignalFlags, TuningState,
};
pub use foundation::config::{CrtConfig, OutputConfig};
pub use foundation::core::{FrameIndex, Framebuffer, pack_rgb, unpack_rgb};
pub use foundation::error::{CrtError, CrtResult};
pub use pipeline::phosphor::{fade_phosphors, fade_pixel};
pub use pipeline::sequencer::{ACCUMULATION_PASSES, FieldSequencer, SequencerStats};
pub use pipeline::session::CrtSession;
pub use present::{
    LoopStats, Poll, Presenter, ScriptEntry, ScriptedPresenter, run_capture_loop, run_loop,
};
pub use signal::engine::{DrawParams, Picture, SignalEngine};
pub use signal::params::{COLORBURST_REFERENCE, SignalParameters, colorburst_table};
pub use signal::raster::{RasterEngine, RasterEngineConfig};
pub use source::adapter::{ChannelOrder, DecodedImage, SourceImage, adapt, adapt_dynamic};
pub use source::loader::{FileSequence, FrameLoader, SequencePattern, load_image};
