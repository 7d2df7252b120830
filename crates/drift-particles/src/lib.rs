//! Drift Particles - ambient particle field simulation
//!
//! Provides the pieces an engine instance is assembled from:
//! - Performance tiers and the device profiler that picks one
//! - An entity pool with wrap-around kinematics
//! - A per-frame proximity graph with per-particle connection caps
//! - A painter that renders everything through a `DrawContext`

mod config;
pub mod curves;
pub mod draw;
pub mod palette;
pub mod particle;
pub mod pool;
pub mod profiler;
pub mod proximity;
pub mod rng;
pub mod tier;

pub use config::{EngineConfig, Variant};
pub use draw::{DrawContext, DrawStyle, Painter};
pub use palette::{ColorClass, Palette};
pub use particle::{DecorativeShape, Entity, Particle, ParticleShape, ShapeKind};
pub use pool::{EntityPool, MotionMode, PoolSettings};
pub use profiler::{DeviceSignals, PerformanceProfiler, ProfilerThresholds};
pub use proximity::{Connection, ProximityGraph};
pub use rng::ParticleRng;
pub use tier::{PerformanceTier, TierKind, TierTable};
