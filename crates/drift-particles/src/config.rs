//! Engine configuration (parsed from TOML)

use crate::draw::{DrawStyle, Painter};
use crate::palette::{ColorClass, Palette};
use crate::particle::ParticleShape;
use crate::pool::{MotionMode, PoolSettings};
use crate::profiler::{PerformanceProfiler, ProfilerThresholds};
use crate::rng::ParticleRng;
use crate::tier::TierTable;
use drift_core::{DriftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for `max_speed` (px per frame)
pub const MAX_SPEED: f64 = 1000.0;

/// Upper bound for `rotation_speed` (radians per frame)
pub const MAX_ROTATION_SPEED: f64 = std::f64::consts::TAU;

/// Which visual layer the engine renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Circles with proximity connections
    #[default]
    Particles,
    /// Mixed particle shapes plus large rotating decorations
    Layered,
}

/// Everything an engine instance needs besides its host and surface.
///
/// Every field has a default, so an empty TOML document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub variant: Variant,
    pub motion: MotionMode,
    /// Wrap-around margin beyond each surface edge (px)
    pub margin: f32,
    /// Quiet period before a resize is applied (ms)
    pub resize_debounce_ms: f64,
    /// Decorative shapes seeded by the layered variant
    pub shape_count: usize,
    /// Maximum absolute velocity component (px per frame)
    pub max_speed: f32,
    pub particle_size: [f32; 2],
    pub particle_opacity: [f32; 2],
    /// Particle outlines; defaults depend on the variant when absent
    pub particle_shapes: Option<Vec<ParticleShape>>,
    pub shape_size: [f32; 2],
    pub shape_opacity: [f32; 2],
    /// Maximum absolute shape rotation speed (radians per frame)
    pub rotation_speed: f32,
    pub line_width: f32,
    pub line_opacity: f32,
    pub pulse: bool,
    /// Fixed RNG seed for reproducible output
    pub seed: Option<u64>,
    pub palette: Palette,
    pub tiers: TierTable,
    pub thresholds: ProfilerThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let pool = PoolSettings::default();
        let style = DrawStyle::default();
        Self {
            variant: Variant::Particles,
            motion: MotionMode::FixedStep,
            margin: pool.margin,
            resize_debounce_ms: 100.0,
            shape_count: 6,
            max_speed: pool.max_speed,
            particle_size: [pool.particle_size.0, pool.particle_size.1],
            particle_opacity: [pool.particle_opacity.0, pool.particle_opacity.1],
            particle_shapes: None,
            shape_size: [pool.shape_size.0, pool.shape_size.1],
            shape_opacity: [pool.shape_opacity.0, pool.shape_opacity.1],
            rotation_speed: pool.rotation_speed,
            line_width: style.line_width,
            line_opacity: style.line_opacity,
            pulse: style.pulse,
            seed: None,
            palette: Palette::default(),
            tiers: TierTable::default(),
            thresholds: ProfilerThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults for the given variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Reject values the engine cannot clamp into something meaningful
    pub fn validate(&self) -> Result<()> {
        check_non_negative("margin", self.margin as f64)?;
        check_non_negative("resize_debounce_ms", self.resize_debounce_ms)?;
        check_bounded("max_speed", self.max_speed as f64, MAX_SPEED)?;
        check_bounded("rotation_speed", self.rotation_speed as f64, MAX_ROTATION_SPEED)?;
        check_non_negative("line_width", self.line_width as f64)?;
        check_unit("line_opacity", self.line_opacity as f64)?;

        check_range("particle_size", self.particle_size)?;
        if self.particle_size[0] <= 0.0 {
            return Err(DriftError::ValueOutOfRange {
                field: "particle_size".to_string(),
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: self.particle_size[0] as f64,
            });
        }
        check_range("shape_size", self.shape_size)?;
        check_range("particle_opacity", self.particle_opacity)?;
        check_unit("particle_opacity", self.particle_opacity[1] as f64)?;
        check_range("shape_opacity", self.shape_opacity)?;
        check_unit("shape_opacity", self.shape_opacity[1] as f64)?;

        if let Some(shapes) = &self.particle_shapes {
            if shapes.is_empty() {
                return Err(DriftError::InvalidConfig(
                    "particle_shapes must list at least one shape".to_string(),
                ));
            }
        }

        for tier in self.tiers.animated() {
            if tier.target_fps == 0 || tier.population_size == 0 {
                return Err(DriftError::InvalidConfig(format!(
                    "{} tier must animate: population_size and target_fps must be positive",
                    tier.kind.as_str()
                )));
            }
            check_non_negative("connection_distance", tier.connection_distance as f64)?;
        }
        Ok(())
    }

    /// Pool parameters derived from this configuration
    pub fn pool_settings(&self) -> PoolSettings {
        let default_shapes = match self.variant {
            Variant::Particles => vec![ParticleShape::Circle],
            Variant::Layered => ParticleShape::ALL.to_vec(),
        };
        PoolSettings {
            margin: self.margin,
            max_speed: self.max_speed,
            particle_size: (self.particle_size[0], self.particle_size[1]),
            particle_opacity: (self.particle_opacity[0], self.particle_opacity[1]),
            particle_shapes: self.particle_shapes.clone().unwrap_or(default_shapes),
            colors: ColorClass::ALL.to_vec(),
            shape_count: match self.variant {
                Variant::Particles => 0,
                Variant::Layered => self.shape_count,
            },
            shape_size: (self.shape_size[0], self.shape_size[1]),
            shape_opacity: (self.shape_opacity[0], self.shape_opacity[1]),
            rotation_speed: self.rotation_speed,
            motion: self.motion,
        }
    }

    pub fn painter(&self) -> Painter {
        Painter::new(
            self.palette.clone(),
            DrawStyle {
                line_width: self.line_width,
                line_opacity: self.line_opacity,
                pulse: self.pulse,
                ..DrawStyle::default()
            },
        )
    }

    pub fn profiler(&self) -> PerformanceProfiler {
        PerformanceProfiler::new(self.thresholds, self.tiers.clone())
    }

    /// Seeded when `seed` is set, otherwise from entropy
    pub fn rng(&self) -> ParticleRng {
        ParticleRng::from_seed_option(self.seed)
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DriftError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: f64::MAX,
            value,
        })
    }
}

fn check_bounded(field: &str, value: f64, max: f64) -> Result<()> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(DriftError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max,
            value,
        })
    }
}

fn check_unit(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DriftError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
            value,
        })
    }
}

fn check_range(field: &str, [min, max]: [f32; 2]) -> Result<()> {
    check_non_negative(field, min as f64)?;
    if max.is_finite() && max >= min {
        Ok(())
    } else {
        Err(DriftError::InvalidConfig(format!(
            "{field}: upper bound {max} is below lower bound {min}"
        )))
    }
}
