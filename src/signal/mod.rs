//! Signal engine boundary.

/// Collaborator trait consumed by the pipeline.
pub mod engine;
/// Per-call parameter construction.
pub mod params;
/// Built-in reference engine.
pub mod raster;
