//! Software rasterizer implementing `DrawContext` over an RGBA image

use drift_core::{Color, Dimensions, DriftError};
use drift_particles::DrawContext;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// An in-memory 2D canvas. Shapes are blended source-over onto the
/// existing pixels; coverage is sampled at pixel centers.
#[derive(Clone)]
pub struct RasterContext {
    image: RgbaImage,
}

impl RasterContext {
    pub fn new(size: Dimensions) -> Self {
        let (w, h) = pixel_size(size);
        Self {
            image: RgbaImage::new(w, h),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode as PNG (format chosen by extension)
    pub fn save(&self, path: &Path) -> drift_core::Result<()> {
        self.image
            .save(path)
            .map_err(|e| DriftError::ImageError(e.to_string()))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let src_a = (color.a * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel(x, y).0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let mix = |src: f32, dst: u8| -> u8 {
            let dst = dst as f32 / 255.0;
            let v = (src * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        let pixel = Rgba([
            mix(color.r, dst[0]),
            mix(color.g, dst[1]),
            mix(color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]);
        self.image.put_pixel(x, y, pixel);
    }

    /// Blend `color` into every pixel whose center lies in `[min, max]`,
    /// scaled by the coverage `shade` returns for that center.
    fn shade_box<F>(&mut self, min: Vec2, max: Vec2, color: Color, shade: F)
    where
        F: Fn(Vec2) -> f32,
    {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 || !min.is_finite() || !max.is_finite() {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(w);
        let y1 = (max.y.ceil().max(0.0) as u32).min(h);

        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = shade(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

fn pixel_size(size: Dimensions) -> (u32, u32) {
    let size = size.clamped();
    (size.width.round() as u32, size.height.round() as u32)
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Even-odd point-in-polygon test
fn contains(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl DrawContext for RasterContext {
    fn size(&self) -> Dimensions {
        let (w, h) = self.image.dimensions();
        Dimensions::new(w as f32, h as f32)
    }

    fn resize(&mut self, size: Dimensions) {
        let (w, h) = pixel_size(size);
        self.image = RgbaImage::new(w, h);
    }

    fn clear(&mut self, color: Color) {
        let pixel = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(0.5);
        let extent = Vec2::splat(r);
        self.shade_box(center - extent, center + extent, color, |p| {
            if p.distance_squared(center) <= r * r {
                1.0
            } else {
                0.0
            }
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min = points.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
        let max = points.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
        self.shade_box(min, max, color, |p| if contains(points, p) { 1.0 } else { 0.0 });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let half = (width * 0.5).max(0.5);
        let extent = Vec2::splat(half);
        self.shade_box(from.min(to) - extent, from.max(to) + extent, color, |p| {
            if segment_distance(p, from, to) <= half {
                1.0
            } else {
                0.0
            }
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let half = (width * 0.5).max(0.5);
        let extent = Vec2::splat(radius + half);
        self.shade_box(center - extent, center + extent, color, |p| {
            if (p.distance(center) - radius).abs() <= half {
                1.0
            } else {
                0.0
            }
        });
    }

    fn fill_radial_glow(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let extent = Vec2::splat(radius);
        self.shade_box(center - extent, center + extent, color, |p| {
            (1.0 - p.distance(center) / radius).max(0.0)
        });
    }
}
