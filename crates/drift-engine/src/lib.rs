//! Drift Engine - mountable ambient background animation
//!
//! This crate provides the `AmbientEngine` lifecycle manager, which binds a
//! particle scene to a rendering surface and a frame host.

mod lifecycle;
mod scene;
mod surface;

pub use lifecycle::{AmbientEngine, EngineStats, MountOutcome};
pub use scene::AmbientScene;
pub use surface::{CanvasSurface, Surface};

#[cfg(test)]
mod testing;
