//! Source frames: decoding and layout adaptation.

/// Channel reorder into engine layout.
pub mod adapter;
/// Single-file and numbered-sequence loaders.
pub mod loader;
