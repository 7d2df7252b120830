//! CLI command implementations

pub mod run;
pub mod snapshot;
pub mod tier;

use anyhow::{Context, Result};
use drift_core::Dimensions;
use drift_particles::{DeviceSignals, EngineConfig, Variant};

/// Options shared by every command that builds an engine
pub struct EngineOptions {
    pub config: Option<String>,
    pub variant: Option<Variant>,
    pub seed: Option<u64>,
    pub width: f32,
    pub height: f32,
    pub cores: Option<u32>,
    pub reduced_motion: bool,
}

impl EngineOptions {
    /// Load the config file (or defaults) and apply command-line overrides
    pub fn load_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config '{path}'"))?,
            None => EngineConfig::default(),
        };
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }

    pub fn signals(&self) -> DeviceSignals {
        let mut signals = DeviceSignals::new(self.width).with_reduced_motion(self.reduced_motion);
        if let Some(cores) = self.cores {
            signals = signals.with_cores(cores);
        }
        signals
    }

    pub fn viewport(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}
