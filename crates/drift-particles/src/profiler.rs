//! Device classification into performance tiers

use crate::tier::{PerformanceTier, TierKind, TierTable};
use serde::{Deserialize, Serialize};

/// Snapshot of environment signals taken once at mount.
///
/// `None` means the host could not report the signal; it never causes an
/// error, the rule that needs it simply does not match.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceSignals {
    /// Viewport width in logical pixels
    pub viewport_width: Option<f32>,
    /// Logical core count hint
    pub hardware_concurrency: Option<u32>,
    /// Accessibility preference for reduced motion
    pub prefers_reduced_motion: bool,
}

impl DeviceSignals {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            viewport_width: Some(viewport_width),
            ..Self::default()
        }
    }

    pub fn with_cores(mut self, cores: u32) -> Self {
        self.hardware_concurrency = Some(cores);
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.prefers_reduced_motion = reduced;
        self
    }
}

/// Breakpoints used by the classification rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerThresholds {
    /// Viewports narrower than this are `low`
    pub narrow_width: f32,
    /// Core counts at or below this are `low`
    pub low_core_count: u32,
    /// Viewports narrower than this (and not `low`) are `medium`
    pub medium_width: f32,
}

impl Default for ProfilerThresholds {
    fn default() -> Self {
        Self {
            narrow_width: 768.0,
            low_core_count: 4,
            medium_width: 1200.0,
        }
    }
}

/// Selects a tier from device signals. Pure: no state, no side effects.
#[derive(Debug, Clone, Default)]
pub struct PerformanceProfiler {
    pub thresholds: ProfilerThresholds,
    pub tiers: TierTable,
}

impl PerformanceProfiler {
    pub fn new(thresholds: ProfilerThresholds, tiers: TierTable) -> Self {
        Self { thresholds, tiers }
    }

    /// Classify signals into a tier kind. Rules are evaluated top-down and
    /// the first match wins; reduced motion overrides everything.
    pub fn classify(&self, signals: &DeviceSignals) -> TierKind {
        if signals.prefers_reduced_motion {
            return TierKind::Reduced;
        }

        let t = &self.thresholds;
        let width = signals.viewport_width.filter(|w| w.is_finite());

        let narrow = width.is_some_and(|w| w < t.narrow_width);
        let few_cores = signals
            .hardware_concurrency
            .is_some_and(|c| c > 0 && c <= t.low_core_count);
        if narrow || few_cores {
            return TierKind::Low;
        }

        if width.is_some_and(|w| w < t.medium_width) {
            return TierKind::Medium;
        }

        TierKind::High
    }

    /// Select the tier for this mount
    pub fn select_tier(&self, signals: &DeviceSignals) -> PerformanceTier {
        let kind = self.classify(signals);
        let tier = self.tiers.get(kind);
        log::info!(
            "[profiler] Selected {} tier ({} particles, {} fps) for {:?}",
            kind.as_str(),
            tier.population_size,
            tier.target_fps,
            signals
        );
        tier
    }
}
