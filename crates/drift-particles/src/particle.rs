//! Entity types: particles and decorative shapes

use crate::palette::ColorClass;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Outline a particle is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleShape {
    Circle,
    Hexagon,
    Square,
}

impl ParticleShape {
    pub const ALL: [ParticleShape; 3] = [
        ParticleShape::Circle,
        ParticleShape::Hexagon,
        ParticleShape::Square,
    ];
}

/// A drifting point that takes part in proximity connections
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement per simulated frame
    pub velocity: Vec2,
    /// Radius (or half extent) in pixels, always > 0
    pub size: f32,
    /// Base opacity in [0, 1]
    pub opacity: f32,
    pub color: ColorClass,
    pub shape: ParticleShape,
}

impl Particle {
    /// A circle particle at rest; mostly useful for building scenarios.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
            color: ColorClass::Primary,
            shape: ParticleShape::Circle,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }
}

/// Kind of large background shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Ring,
    DottedRing,
    RadialGlow,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Ring, ShapeKind::DottedRing, ShapeKind::RadialGlow];
}

/// A large, slowly rotating decoration. Never connected to anything.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorativeShape {
    pub position: Vec2,
    /// Radius in pixels
    pub size: f32,
    /// Accumulated rotation in radians; unbounded, wrapped at draw time
    pub rotation: f32,
    /// Radians per simulated frame
    pub rotation_speed: f32,
    pub opacity: f32,
    pub color: ColorClass,
    pub kind: ShapeKind,
}

impl DecorativeShape {
    /// Rotation reduced into [0, 2π)
    pub fn draw_angle(&self) -> f32 {
        let angle = self.rotation.rem_euclid(std::f32::consts::TAU);
        // rem_euclid rounds tiny negative rotations up to TAU
        if angle >= std::f32::consts::TAU {
            0.0
        } else {
            angle
        }
    }
}

/// Borrowed view of any pooled entity, handed to `EntityPool::for_each`
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Particle(usize, &'a Particle),
    Shape(usize, &'a DecorativeShape),
}
