//! Headless run command: drives an engine for a number of host paints

use super::EngineOptions;
use crate::headless::{drive, RunPlan};
use crate::raster::RasterContext;
use anyhow::{Context, Result};
use drift_core::Dimensions;
use drift_engine::{AmbientEngine, CanvasSurface, EngineStats, MountOutcome};
use drift_runtime::ManualHost;

pub struct RunArgs {
    pub engine: EngineOptions,
    pub host_hz: f64,
    pub frames: u32,
    pub hide_at: Option<u32>,
    pub show_at: Option<u32>,
    pub resize: Option<(u32, [f32; 2])>,
}

/// Mount, drive and unmount; returns what happened
pub fn simulate(args: &RunArgs) -> Result<(MountOutcome, EngineStats, f64)> {
    let config = args.engine.load_config()?;
    let viewport = args.engine.viewport();

    let mut engine = AmbientEngine::new(ManualHost::new(), config);
    let surface = CanvasSurface::new(RasterContext::new(viewport), viewport);
    let outcome = engine
        .mount(surface, &args.engine.signals())
        .context("Failed to mount engine")?;

    let plan = RunPlan {
        hide_at: args.hide_at,
        show_at: args.show_at,
        resize_at: args
            .resize
            .map(|(at, [w, h])| (at, Dimensions::new(w, h))),
        ..RunPlan::new(args.host_hz, args.frames)
    };
    let elapsed = drive(&mut engine, &plan);
    let stats = engine.stats();
    engine.unmount();

    Ok((outcome, stats, elapsed))
}

pub fn run(args: RunArgs) -> Result<()> {
    let (outcome, stats, elapsed) = simulate(&args)?;

    println!("Outcome: {outcome:?}");
    println!("Host paints: {} at {} Hz ({elapsed:.1} ms)", args.frames, args.host_hz);
    println!("Steps: {}", stats.steps);
    println!("Draw passes: {}", stats.draws);
    println!("Throttled callbacks: {}", stats.skipped);
    println!("Ignored callbacks: {}", stats.ignored);
    println!("Connections (last frame): {}", stats.connections);
    Ok(())
}
