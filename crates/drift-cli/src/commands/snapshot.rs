//! Snapshot command: render the engine's current frame to a PNG

use super::EngineOptions;
use crate::headless::{drive, RunPlan};
use crate::raster::RasterContext;
use anyhow::{Context, Result};
use drift_engine::{AmbientEngine, CanvasSurface};
use drift_particles::DrawContext;
use drift_runtime::ManualHost;
use std::path::Path;

pub struct SnapshotArgs {
    pub engine: EngineOptions,
    pub output: String,
    /// Host paints to simulate before capturing
    pub frames: u32,
    pub host_hz: f64,
}

/// Render the frame that would be on screen after `frames` host paints
pub fn render(args: &SnapshotArgs) -> Result<RasterContext> {
    let config = args.engine.load_config()?;
    let viewport = args.engine.viewport();

    let mut engine = AmbientEngine::new(ManualHost::new(), config);
    let surface = CanvasSurface::new(RasterContext::new(viewport), viewport);
    engine
        .mount(surface, &args.engine.signals())
        .context("Failed to mount engine")?;
    drive(&mut engine, &RunPlan::new(args.host_hz, args.frames));

    let canvas = engine
        .surface()
        .and_then(|s| s.context_ref())
        .cloned()
        .context("No drawing context to capture")?;
    engine.unmount();
    Ok(canvas)
}

pub fn run(args: SnapshotArgs) -> Result<()> {
    let canvas = render(&args)?;
    let path = Path::new(&args.output);
    canvas
        .save(path)
        .with_context(|| format!("Failed to write snapshot to '{}'", args.output))?;

    let size = canvas.size();
    println!(
        "Saved {}x{} snapshot to {}",
        size.width,
        size.height,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(reduced_motion: bool) -> SnapshotArgs {
        SnapshotArgs {
            engine: EngineOptions {
                config: None,
                variant: None,
                seed: Some(4),
                width: 160.0,
                height: 120.0,
                cores: Some(8),
                reduced_motion,
            },
            output: "drift.png".to_string(),
            frames: 5,
            host_hz: 60.0,
        }
    }

    #[test]
    fn animated_snapshot_has_particles() {
        let canvas = render(&args(false)).unwrap();
        assert_eq!(canvas.image().dimensions(), (160, 120));
        assert!(canvas.image().pixels().any(|p| p.0[3] > 0));
    }

    #[test]
    fn reduced_snapshot_is_cleared_background() {
        let canvas = render(&args(true)).unwrap();
        assert!(canvas.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn run_writes_png() {
        let path = std::env::temp_dir().join(format!("drift-snapshot-{}.png", std::process::id()));
        let mut snapshot = args(false);
        snapshot.output = path.display().to_string();
        run(snapshot).unwrap();

        let decoded = image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (160, 120));
    }

    #[test]
    fn run_reports_unwritable_output() {
        let mut snapshot = args(false);
        snapshot.output = "/no/such/dir/drift.png".to_string();
        let err = run(snapshot).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/dir/drift.png"));
    }
}
