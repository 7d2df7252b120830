//! Performance tiers: fixed bundles of simulation parameters

use serde::{Deserialize, Serialize};

/// Which tier a parameter bundle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Reduced,
    Low,
    Medium,
    High,
}

impl TierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierKind::Reduced => "reduced",
            TierKind::Low => "low",
            TierKind::Medium => "medium",
            TierKind::High => "high",
        }
    }
}

/// Simulation parameters selected once per engine instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTier {
    pub kind: TierKind,
    pub population_size: usize,
    pub max_connections_per_entity: usize,
    pub connection_distance: f32,
    pub target_fps: u32,
}

impl PerformanceTier {
    /// Static frame only. Never animated, regardless of configuration.
    pub const REDUCED: Self = Self {
        kind: TierKind::Reduced,
        population_size: 0,
        max_connections_per_entity: 0,
        connection_distance: 0.0,
        target_fps: 0,
    };

    pub const LOW: Self = Self {
        kind: TierKind::Low,
        population_size: 30,
        max_connections_per_entity: 2,
        connection_distance: 100.0,
        target_fps: 30,
    };

    pub const MEDIUM: Self = Self {
        kind: TierKind::Medium,
        population_size: 60,
        max_connections_per_entity: 3,
        connection_distance: 120.0,
        target_fps: 45,
    };

    pub const HIGH: Self = Self {
        kind: TierKind::High,
        population_size: 100,
        max_connections_per_entity: 4,
        connection_distance: 150.0,
        target_fps: 60,
    };

    /// True when this tier asks for a static frame instead of animation
    pub fn is_reduced(&self) -> bool {
        self.kind == TierKind::Reduced || self.population_size == 0 || self.target_fps == 0
    }

    /// Target interval between simulated frames in milliseconds
    pub fn frame_interval_ms(&self) -> Option<f64> {
        if self.target_fps == 0 {
            None
        } else {
            Some(1000.0 / self.target_fps as f64)
        }
    }
}

/// The animated tiers, overridable from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub low: PerformanceTier,
    pub medium: PerformanceTier,
    pub high: PerformanceTier,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            low: PerformanceTier::LOW,
            medium: PerformanceTier::MEDIUM,
            high: PerformanceTier::HIGH,
        }
    }
}

impl TierTable {
    pub fn get(&self, kind: TierKind) -> PerformanceTier {
        match kind {
            TierKind::Reduced => PerformanceTier::REDUCED,
            TierKind::Low => self.low,
            TierKind::Medium => self.medium,
            TierKind::High => self.high,
        }
    }

    /// Animated tiers in ascending order
    pub fn animated(&self) -> [PerformanceTier; 3] {
        [self.low, self.medium, self.high]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_tier_is_static() {
        assert!(PerformanceTier::REDUCED.is_reduced());
        assert_eq!(PerformanceTier::REDUCED.population_size, 0);
        assert_eq!(PerformanceTier::REDUCED.frame_interval_ms(), None);
    }

    #[test]
    fn animated_tiers_scale_up() {
        let table = TierTable::default();
        let [low, medium, high] = table.animated();
        for tier in [low, medium, high] {
            assert!(!tier.is_reduced());
        }
        assert!(low.population_size < medium.population_size);
        assert!(medium.population_size < high.population_size);
        assert!(low.target_fps <= medium.target_fps);
        assert!(medium.target_fps <= high.target_fps);
    }

    #[test]
    fn frame_interval() {
        let interval = PerformanceTier::LOW.frame_interval_ms().unwrap();
        assert!((interval - 1000.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn table_lookup_never_overrides_reduced() {
        let mut table = TierTable::default();
        table.low.population_size = 5;
        assert_eq!(table.get(TierKind::Low).population_size, 5);
        assert_eq!(table.get(TierKind::Reduced), PerformanceTier::REDUCED);
    }

    #[test]
    fn tier_kind_from_toml() {
        let tier: PerformanceTier = toml::from_str(
            r#"
kind = "medium"
population_size = 10
max_connections_per_entity = 1
connection_distance = 80.0
target_fps = 24
"#,
        )
        .unwrap();
        assert_eq!(tier.kind, TierKind::Medium);
        assert_eq!(tier.kind.as_str(), "medium");
        assert_eq!(tier.target_fps, 24);
    }
}
