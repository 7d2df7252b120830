//! Tier command: show which performance tier a device would get

use super::EngineOptions;
use anyhow::Result;
use drift_particles::PerformanceTier;

pub fn select(options: &EngineOptions) -> Result<PerformanceTier> {
    let config = options.load_config()?;
    Ok(config.profiler().select_tier(&options.signals()))
}

pub fn run(options: EngineOptions) -> Result<()> {
    let tier = select(&options)?;

    println!("Tier: {}", tier.kind.as_str());
    if tier.is_reduced() {
        println!("Animation disabled: a single static frame is drawn");
        return Ok(());
    }
    println!("Particles: {}", tier.population_size);
    println!("Max connections per particle: {}", tier.max_connections_per_entity);
    println!("Connection distance: {} px", tier.connection_distance);
    println!("Target frame rate: {} fps", tier.target_fps);
    Ok(())
}
