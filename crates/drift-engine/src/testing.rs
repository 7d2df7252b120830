//! Draw context that counts calls

use drift_core::{Color, Dimensions};
use drift_particles::DrawContext;
use glam::Vec2;

#[derive(Debug, Default)]
pub struct CountingContext {
    pub size: Dimensions,
    pub resizes: usize,
    pub clears: usize,
    pub circles: usize,
    pub polygons: usize,
    pub lines: usize,
    pub rings: usize,
    pub glows: usize,
}

impl DrawContext for CountingContext {
    fn size(&self) -> Dimensions {
        self.size
    }

    fn resize(&mut self, size: Dimensions) {
        self.size = size;
        self.resizes += 1;
    }

    fn clear(&mut self, _color: Color) {
        self.clears += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.circles += 1;
    }

    fn fill_polygon(&mut self, _points: &[Vec2], _color: Color) {
        self.polygons += 1;
    }

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Color) {
        self.lines += 1;
    }

    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _width: f32, _color: Color) {
        self.rings += 1;
    }

    fn fill_radial_glow(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.glows += 1;
    }
}
