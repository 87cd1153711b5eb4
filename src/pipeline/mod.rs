pub mod phosphor;
pub mod sequencer;
pub mod session;
