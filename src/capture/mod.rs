//! Frame-indexed export.
//!
//! Sinks consume processed framebuffers in strictly increasing frame order.

pub mod overlay;
pub mod sequencer;
pub mod sink;
