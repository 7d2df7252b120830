//! 2D drawing context trait and the painter that renders a pool

use crate::curves::pulse;
use crate::palette::Palette;
use crate::particle::{DecorativeShape, Particle, ParticleShape, ShapeKind};
use crate::pool::EntityPool;
use crate::proximity::Connection;
use drift_core::{Color, Dimensions};
use glam::Vec2;
use std::f32::consts::TAU;

/// Immediate-mode 2D drawing API offered by a rendering surface.
///
/// Colors carry their final alpha; implementations blend over what is
/// already on the surface.
pub trait DrawContext {
    /// Size of the drawable area
    fn size(&self) -> Dimensions;

    /// Re-allocate the backing store; contents are discarded
    fn resize(&mut self, size: Dimensions);

    /// Replace every pixel with `color` (no blending)
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);

    /// Disc whose alpha falls from `color.a` at the center to zero at `radius`
    fn fill_radial_glow(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Line and effect parameters for the painter
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub line_width: f32,
    /// Connection alpha at strength 1.0
    pub line_opacity: f32,
    /// Modulate drawn opacity with the step-keyed pulse
    pub pulse: bool,
    /// Ring stroke width for decorative shapes
    pub ring_width: f32,
    /// Dash count for dotted rings
    pub ring_dashes: usize,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            line_opacity: 0.35,
            pulse: true,
            ring_width: 1.5,
            ring_dashes: 24,
        }
    }
}

/// Renders pool contents through a [`DrawContext`]
#[derive(Debug, Clone, Default)]
pub struct Painter {
    pub palette: Palette,
    pub style: DrawStyle,
}

impl Painter {
    pub fn new(palette: Palette, style: DrawStyle) -> Self {
        Self { palette, style }
    }

    /// The single frame shown when animation is disabled
    pub fn paint_static<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        ctx.clear(self.palette.background_or_clear());
    }

    /// Paint one animated frame: background, shapes, connections, particles.
    pub fn paint_frame<C: DrawContext + ?Sized>(
        &self,
        ctx: &mut C,
        pool: &EntityPool,
        connections: &[Connection],
    ) {
        ctx.clear(self.palette.background_or_clear());

        let steps = pool.steps();
        for shape in pool.shapes() {
            self.paint_shape(ctx, shape, steps);
        }

        let particles = pool.particles();
        for c in connections {
            let (Some(a), Some(b)) = (particles.get(c.a), particles.get(c.b)) else {
                continue;
            };
            let color = self
                .palette
                .line
                .with_alpha(c.strength * self.style.line_opacity);
            ctx.stroke_line(a.position, b.position, self.style.line_width, color);
        }

        for p in particles {
            self.paint_particle(ctx, p, steps);
        }
    }

    fn opacity(&self, base: f32, steps: u64, at: Vec2) -> f32 {
        if self.style.pulse {
            base * pulse(steps, at.x, at.y)
        } else {
            base
        }
    }

    fn paint_particle<C: DrawContext + ?Sized>(&self, ctx: &mut C, p: &Particle, steps: u64) {
        let color = self
            .palette
            .resolve(p.color)
            .with_alpha(self.opacity(p.opacity, steps, p.position));

        match p.shape {
            ParticleShape::Circle => ctx.fill_circle(p.position, p.size, color),
            ParticleShape::Hexagon => {
                let points = regular_polygon(p.position, p.size, 6, 0.0);
                ctx.fill_polygon(&points, color);
            }
            ParticleShape::Square => {
                let points = regular_polygon(p.position, p.size * std::f32::consts::SQRT_2, 4, TAU / 8.0);
                ctx.fill_polygon(&points, color);
            }
        }
    }

    fn paint_shape<C: DrawContext + ?Sized>(&self, ctx: &mut C, shape: &DecorativeShape, steps: u64) {
        let color = self
            .palette
            .resolve(shape.color)
            .with_alpha(self.opacity(shape.opacity, steps, shape.position));

        match shape.kind {
            ShapeKind::Ring => {
                ctx.stroke_circle(shape.position, shape.size, self.style.ring_width, color);
            }
            ShapeKind::DottedRing => {
                for (from, to) in dashes(shape, self.style.ring_dashes) {
                    ctx.stroke_line(from, to, self.style.ring_width, color);
                }
            }
            ShapeKind::RadialGlow => {
                ctx.fill_radial_glow(shape.position, shape.size, color);
            }
        }
    }
}

/// Vertices of a regular polygon with circumradius `radius`
pub fn regular_polygon(center: Vec2, radius: f32, sides: usize, rotation: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|k| {
            let angle = rotation + TAU * k as f32 / sides as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Dash segments of a dotted ring, rotated by the shape's draw angle.
/// Each dash covers half of its angular slot.
fn dashes(shape: &DecorativeShape, count: usize) -> Vec<(Vec2, Vec2)> {
    let count = count.max(1);
    let slot = TAU / count as f32;
    let base = shape.draw_angle();
    (0..count)
        .map(|k| {
            let start = base + slot * k as f32;
            let end = start + slot * 0.5;
            let point = |a: f32| shape.position + Vec2::new(a.cos(), a.sin()) * shape.size;
            (point(start), point(end))
        })
        .collect()
}
