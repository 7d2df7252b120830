//! Entity pool: owns particles and shapes and their kinematics

use crate::palette::ColorClass;
use crate::particle::{DecorativeShape, Entity, Particle, ParticleShape, ShapeKind};
use crate::rng::ParticleRng;
use crate::tier::PerformanceTier;
use drift_core::Dimensions;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Largest delta accepted by `MotionMode::ElapsedScaled`, in frames
pub const MAX_DELTA_FRAMES: f32 = 4.0;

/// How the per-step delta hint affects motion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionMode {
    /// One velocity unit per accepted frame; speed is tied to the tier's
    /// frame rate, not wall-clock time.
    #[default]
    FixedStep,
    /// Velocity scaled by elapsed time in frame units (clamped).
    ElapsedScaled,
}

impl MotionMode {
    /// Displacement multiplier for one step
    pub fn factor(&self, delta_frames: f32) -> f32 {
        match self {
            MotionMode::FixedStep => 1.0,
            MotionMode::ElapsedScaled => {
                if delta_frames.is_finite() {
                    delta_frames.clamp(0.0, MAX_DELTA_FRAMES)
                } else {
                    1.0
                }
            }
        }
    }
}

/// Generation and kinematics parameters, fixed for a pool's lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSettings {
    /// Distance beyond each edge before an entity wraps around
    pub margin: f32,
    /// Maximum absolute velocity component (px per frame)
    pub max_speed: f32,
    pub particle_size: (f32, f32),
    pub particle_opacity: (f32, f32),
    pub particle_shapes: Vec<ParticleShape>,
    pub colors: Vec<ColorClass>,
    /// Decorative shapes to seed; zero for the particles-only field
    pub shape_count: usize,
    pub shape_size: (f32, f32),
    pub shape_opacity: (f32, f32),
    /// Maximum absolute rotation speed (radians per frame)
    pub rotation_speed: f32,
    pub motion: MotionMode,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            margin: 20.0,
            max_speed: 0.5,
            particle_size: (1.0, 3.0),
            particle_opacity: (0.2, 0.7),
            particle_shapes: vec![ParticleShape::Circle],
            colors: ColorClass::ALL.to_vec(),
            shape_count: 0,
            shape_size: (60.0, 180.0),
            shape_opacity: (0.04, 0.12),
            rotation_speed: 0.005,
            motion: MotionMode::FixedStep,
        }
    }
}

/// Owns the simulated entities of one mount.
///
/// The population is seeded once by [`EntityPool::initialize`] and stays the
/// same size until the pool is dropped. Only `step` mutates entities.
pub struct EntityPool {
    settings: PoolSettings,
    particles: Vec<Particle>,
    shapes: Vec<DecorativeShape>,
    steps: u64,
    rng: ParticleRng,
}

impl EntityPool {
    pub fn new(settings: PoolSettings, rng: ParticleRng) -> Self {
        Self {
            settings,
            particles: Vec::new(),
            shapes: Vec::new(),
            steps: 0,
            rng,
        }
    }

    /// Build a pool around explicit particles, skipping random seeding.
    pub fn with_particles(settings: PoolSettings, particles: Vec<Particle>) -> Self {
        Self {
            settings,
            particles,
            shapes: Vec::new(),
            steps: 0,
            rng: ParticleRng::new(0),
        }
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Seed `tier.population_size` particles and the configured number of
    /// decorative shapes uniformly over `surface`. Replaces any previous
    /// contents.
    pub fn initialize(&mut self, tier: &PerformanceTier, surface: Dimensions) {
        let surface = surface.clamped();
        self.steps = 0;
        self.particles.clear();
        self.shapes.clear();
        self.particles.reserve_exact(tier.population_size);

        for _ in 0..tier.population_size {
            let particle = self.spawn_particle(surface);
            self.particles.push(particle);
        }
        for _ in 0..self.settings.shape_count {
            let shape = self.spawn_shape(surface);
            self.shapes.push(shape);
        }

        log::debug!(
            "[pool] Seeded {} particle(s), {} shape(s) over {}x{}",
            self.particles.len(),
            self.shapes.len(),
            surface.width,
            surface.height
        );
    }

    fn spawn_particle(&mut self, surface: Dimensions) -> Particle {
        let s = &self.settings;
        let (size_min, size_max) = s.particle_size;
        let (op_min, op_max) = s.particle_opacity;
        let max_speed = s.max_speed;

        let rng = &mut self.rng;
        let position = Vec2::new(rng.range(0.0, surface.width), rng.range(0.0, surface.height));
        let velocity = Vec2::new(rng.signed(max_speed), rng.signed(max_speed));
        let size = rng.range(size_min, size_max).max(0.1);
        let opacity = rng.range(op_min, op_max).clamp(0.0, 1.0);
        let color = rng.pick(&s.colors).unwrap_or(ColorClass::Primary);
        let shape = rng
            .pick(&s.particle_shapes)
            .unwrap_or(ParticleShape::Circle);

        Particle {
            position,
            velocity,
            size,
            opacity,
            color,
            shape,
        }
    }

    fn spawn_shape(&mut self, surface: Dimensions) -> DecorativeShape {
        let s = &self.settings;
        let (size_min, size_max) = s.shape_size;
        let (op_min, op_max) = s.shape_opacity;
        let rotation_speed = s.rotation_speed;

        let rng = &mut self.rng;
        DecorativeShape {
            position: Vec2::new(rng.range(0.0, surface.width), rng.range(0.0, surface.height)),
            size: rng.range(size_min, size_max).max(1.0),
            rotation: rng.range(0.0, std::f32::consts::TAU),
            rotation_speed: rng.signed(rotation_speed),
            opacity: rng.range(op_min, op_max).clamp(0.0, 1.0),
            color: rng.pick(&s.colors).unwrap_or(ColorClass::Primary),
            kind: rng.pick(&ShapeKind::ALL).unwrap_or(ShapeKind::Ring),
        }
    }

    /// Advance every entity by one simulated frame.
    ///
    /// `delta_frames` only matters under `MotionMode::ElapsedScaled`.
    /// Positions are wrapped into `[-margin, extent + margin)` on both axes.
    pub fn step(&mut self, delta_frames: f32, surface: Dimensions) {
        let surface = surface.clamped();
        let factor = self.settings.motion.factor(delta_frames);
        let margin = self.settings.margin.max(0.0);

        for p in &mut self.particles {
            p.position += p.velocity * factor;
            p.position.x = wrap_coord(p.position.x, surface.width, margin);
            p.position.y = wrap_coord(p.position.y, surface.height, margin);
        }
        for shape in &mut self.shapes {
            shape.rotation += shape.rotation_speed * factor;
        }
        self.steps += 1;
    }

    /// Visit every entity: particles in population order, then shapes.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(Entity<'_>),
    {
        for (i, p) in self.particles.iter().enumerate() {
            visitor(Entity::Particle(i, p));
        }
        for (i, s) in self.shapes.iter().enumerate() {
            visitor(Entity::Shape(i, s));
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn shapes(&self) -> &[DecorativeShape] {
        &self.shapes
    }

    /// Steps taken since initialization; drives the opacity pulse
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total entity count (particles and shapes)
    pub fn len(&self) -> usize {
        self.particles.len() + self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.shapes.is_empty()
    }
}

/// Wrap `v` into `[-margin, extent + margin)`, re-entering from the
/// opposite edge. Non-finite input lands on the low edge.
pub fn wrap_coord(v: f32, extent: f32, margin: f32) -> f32 {
    let span = extent + 2.0 * margin;
    if !v.is_finite() || span <= 0.0 {
        return -margin;
    }
    let low = -margin;
    if v >= low && v < extent + margin {
        return v;
    }
    let mut offset = (v - low).rem_euclid(span);
    // rem_euclid can round up to `span` for tiny negative offsets
    if offset >= span {
        offset = 0.0;
    }
    let wrapped = low + offset;
    if wrapped < extent + margin {
        wrapped
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn surface() -> Dimensions {
        Dimensions::new(800.0, 600.0)
    }

    fn layered_settings() -> PoolSettings {
        PoolSettings {
            shape_count: 5,
            particle_shapes: ParticleShape::ALL.to_vec(),
            ..PoolSettings::default()
        }
    }

    #[test]
    fn initialize_seeds_population() {
        let mut pool = EntityPool::new(PoolSettings::default(), ParticleRng::new(1));
        pool.initialize(&PerformanceTier::MEDIUM, surface());
        assert_eq!(pool.particles().len(), PerformanceTier::MEDIUM.population_size);
        assert!(pool.shapes().is_empty());

        for p in pool.particles() {
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..600.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 0.5 && p.velocity.y.abs() <= 0.5);
            assert!(p.size > 0.0);
            assert!((0.0..=1.0).contains(&p.opacity));
            assert_eq!(p.shape, ParticleShape::Circle);
        }
    }

    #[test]
    fn layered_pool_has_fixed_shape_count() {
        for tier in [PerformanceTier::LOW, PerformanceTier::HIGH] {
            let mut pool = EntityPool::new(layered_settings(), ParticleRng::new(2));
            pool.initialize(&tier, surface());
            assert_eq!(pool.shapes().len(), 5);
            assert_eq!(pool.len(), tier.population_size + 5);
        }
    }

    #[test]
    fn reduced_tier_seeds_nothing() {
        let mut pool = EntityPool::new(PoolSettings::default(), ParticleRng::new(3));
        pool.initialize(&PerformanceTier::REDUCED, surface());
        assert!(pool.is_empty());
    }

    #[test]
    fn same_seed_same_pool() {
        let mut a = EntityPool::new(layered_settings(), ParticleRng::new(11));
        let mut b = EntityPool::new(layered_settings(), ParticleRng::new(11));
        a.initialize(&PerformanceTier::LOW, surface());
        b.initialize(&PerformanceTier::LOW, surface());
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.shapes(), b.shapes());
    }

    #[test]
    fn step_applies_velocity_once_per_frame() {
        let particles = vec![Particle::at(100.0, 100.0).with_velocity(0.5, -0.25)];
        let mut pool = EntityPool::with_particles(PoolSettings::default(), particles);

        // Fixed step ignores the delta hint
        pool.step(3.0, surface());
        let p = &pool.particles()[0];
        assert!((p.position.x - 100.5).abs() < 1e-5);
        assert!((p.position.y - 99.75).abs() < 1e-5);
        assert_eq!(pool.steps(), 1);
    }

    #[test]
    fn elapsed_scaled_uses_clamped_delta() {
        let settings = PoolSettings {
            motion: MotionMode::ElapsedScaled,
            ..PoolSettings::default()
        };
        let particles = vec![Particle::at(100.0, 100.0).with_velocity(1.0, 0.0)];
        let mut pool = EntityPool::with_particles(settings, particles);

        pool.step(2.0, surface());
        assert!((pool.particles()[0].position.x - 102.0).abs() < 1e-5);

        pool.step(100.0, surface());
        assert!((pool.particles()[0].position.x - 106.0).abs() < 1e-5);

        pool.step(-5.0, surface());
        assert!((pool.particles()[0].position.x - 106.0).abs() < 1e-5);
    }

    #[test]
    fn wraps_to_opposite_edge() {
        let particles = vec![
            Particle::at(819.8, 300.0).with_velocity(0.5, 0.0),
            Particle::at(-19.8, 300.0).with_velocity(-0.5, 0.0),
            Particle::at(400.0, 619.9).with_velocity(0.0, 0.5),
        ];
        let mut pool = EntityPool::with_particles(PoolSettings::default(), particles);
        pool.step(1.0, surface());

        let ps = pool.particles();
        assert!(ps[0].position.x < 0.0, "right exit re-enters left");
        assert!(ps[1].position.x > 800.0, "left exit re-enters right");
        assert!(ps[2].position.y < 0.0, "bottom exit re-enters top");
    }

    #[test]
    fn shapes_rotate_unbounded() {
        let mut pool = EntityPool::new(
            PoolSettings {
                rotation_speed: 0.5,
                ..layered_settings()
            },
            ParticleRng::new(5),
        );
        pool.initialize(&PerformanceTier::LOW, surface());
        let before: Vec<f32> = pool.shapes().iter().map(|s| s.rotation).collect();
        for _ in 0..100 {
            pool.step(1.0, surface());
        }
        for (shape, start) in pool.shapes().iter().zip(before) {
            let expected = start + shape.rotation_speed * 100.0;
            assert!((shape.rotation - expected).abs() < 1e-2);
            assert!((0.0..std::f32::consts::TAU).contains(&shape.draw_angle()));
        }
    }

    #[test]
    fn for_each_visits_particles_then_shapes() {
        let mut pool = EntityPool::new(layered_settings(), ParticleRng::new(8));
        pool.initialize(&PerformanceTier::LOW, surface());

        let mut seen_shape = false;
        let mut particles = 0;
        let mut shapes = 0;
        pool.for_each(|entity| match entity {
            Entity::Particle(_, _) => {
                assert!(!seen_shape);
                particles += 1;
            }
            Entity::Shape(_, _) => {
                seen_shape = true;
                shapes += 1;
            }
        });
        assert_eq!(particles, PerformanceTier::LOW.population_size);
        assert_eq!(shapes, 5);
    }

    #[test]
    fn extreme_speeds_seed_without_panicking() {
        let settings = PoolSettings {
            max_speed: 3.0e38,
            rotation_speed: f32::MAX,
            ..layered_settings()
        };
        let mut pool = EntityPool::new(settings, ParticleRng::new(13));
        pool.initialize(&PerformanceTier::LOW, surface());
        assert_eq!(pool.particles().len(), PerformanceTier::LOW.population_size);
        pool.step(1.0, surface());
        let margin = pool.settings().margin;
        for p in pool.particles() {
            assert!(p.velocity.is_finite());
            assert!(p.position.x >= -margin && p.position.x < 800.0 + margin);
            assert!(p.position.y >= -margin && p.position.y < 600.0 + margin);
        }
    }

    #[test]
    fn degenerate_surface_is_clamped() {
        let mut pool = EntityPool::new(PoolSettings::default(), ParticleRng::new(9));
        pool.initialize(&PerformanceTier::LOW, Dimensions::new(-5.0, f32::NAN));
        assert_eq!(pool.particles().len(), PerformanceTier::LOW.population_size);
        pool.step(f32::NAN, Dimensions::new(-5.0, f32::NAN));
        for p in pool.particles() {
            assert!(p.position.x.is_finite() && p.position.y.is_finite());
        }
    }

    #[test]
    fn wrap_coord_cases() {
        assert_eq!(wrap_coord(50.0, 100.0, 10.0), 50.0);
        assert_eq!(wrap_coord(-10.0, 100.0, 10.0), -10.0);
        assert!((wrap_coord(110.0, 100.0, 10.0) - -10.0).abs() < 1e-5);
        assert!((wrap_coord(-10.5, 100.0, 10.0) - 109.5).abs() < 1e-4);
        assert_eq!(wrap_coord(f32::INFINITY, 100.0, 10.0), -10.0);
    }

    proptest! {
        #[test]
        fn positions_stay_within_margin(
            seed in any::<u64>(),
            steps in 0usize..300,
            width in 1.0f32..2000.0,
            height in 1.0f32..2000.0,
            max_speed in 0.0f32..50.0,
        ) {
            let settings = PoolSettings { max_speed, ..PoolSettings::default() };
            let margin = settings.margin;
            let mut pool = EntityPool::new(settings, ParticleRng::new(seed));
            let dims = Dimensions::new(width, height);
            pool.initialize(&PerformanceTier::LOW, dims);
            for _ in 0..steps {
                pool.step(1.0, dims);
            }
            for p in pool.particles() {
                prop_assert!(p.position.x >= -margin && p.position.x < width + margin);
                prop_assert!(p.position.y >= -margin && p.position.y < height + margin);
            }
        }

        #[test]
        fn wrap_coord_in_range(v in -1.0e6f32..1.0e6, extent in 0.0f32..5000.0, margin in 0.0f32..100.0) {
            prop_assume!(extent + 2.0 * margin > 0.0);
            let w = wrap_coord(v, extent, margin);
            prop_assert!(w >= -margin && w < extent + margin, "{} -> {}", v, w);
        }
    }
}
