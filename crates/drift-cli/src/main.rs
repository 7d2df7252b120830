//! Drift CLI - headless driver for the Drift ambient animation engine

mod commands;
mod headless;
mod raster;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{run, snapshot, tier, EngineOptions};
use drift_particles::Variant;

/// Largest accepted viewport extent in pixels
const MAX_EXTENT: f32 = 16384.0;

#[derive(Parser)]
#[command(name = "drift")]
#[command(about = "Ambient particle backgrounds, rendered headless", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Engine and device options shared by all commands
#[derive(Args)]
struct EngineArgs {
    /// Path to an engine config file (TOML)
    #[arg(long)]
    config: Option<String>,

    /// Visual variant (particles or layered)
    #[arg(long, value_parser = parse_variant)]
    variant: Option<Variant>,

    /// Fixed RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1920", value_parser = parse_extent)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value = "1080", value_parser = parse_extent)]
    height: f32,

    /// Reported hardware concurrency
    #[arg(long)]
    cores: Option<u32>,

    /// Simulate a reduced-motion preference
    #[arg(long)]
    reduced_motion: bool,
}

impl From<EngineArgs> for EngineOptions {
    fn from(args: EngineArgs) -> Self {
        Self {
            config: args.config,
            variant: args.variant,
            seed: args.seed,
            width: args.width,
            height: args.height,
            cores: args.cores,
            reduced_motion: args.reduced_motion,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Drive an engine headless and print frame statistics
    Run {
        #[command(flatten)]
        engine: EngineArgs,

        /// Host paints to simulate
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Host refresh rate in Hz
        #[arg(long, default_value = "60")]
        host_hz: f64,

        /// Hide the page at this paint index
        #[arg(long)]
        hide_at: Option<u32>,

        /// Show the page again at this paint index
        #[arg(long)]
        show_at: Option<u32>,

        /// Resize at a paint index (INDEX:WIDTHxHEIGHT, e.g. 120:800x600)
        #[arg(long, value_parser = parse_resize)]
        resize: Option<(u32, [f32; 2])>,
    },

    /// Render a frame to a PNG image
    Snapshot {
        #[command(flatten)]
        engine: EngineArgs,

        /// Output image path
        #[arg(short, long, default_value = "drift.png")]
        output: String,

        /// Host paints to simulate before capturing
        #[arg(long, default_value = "120")]
        frames: u32,

        /// Host refresh rate in Hz
        #[arg(long, default_value = "60")]
        host_hz: f64,
    },

    /// Show the performance tier selected for the given device
    Tier {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    match s {
        "particles" => Ok(Variant::Particles),
        "layered" => Ok(Variant::Layered),
        _ => Err(format!(
            "unknown variant '{}'; valid values: particles, layered",
            s
        )),
    }
}

fn parse_extent(s: &str) -> Result<f32, String> {
    let v: f32 = s.trim().parse().map_err(|e| format!("invalid size: {}", e))?;
    if v.is_finite() && (0.0..=MAX_EXTENT).contains(&v) {
        Ok(v)
    } else {
        Err(format!("size must be between 0 and {}, got '{}'", MAX_EXTENT, s))
    }
}

fn parse_resize(s: &str) -> Result<(u32, [f32; 2]), String> {
    let (at, size) = s
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:WIDTHxHEIGHT, got '{}'", s))?;
    let (w, h) = size
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", size))?;
    let at: u32 = at.trim().parse().map_err(|e| format!("invalid index: {}", e))?;
    let w = parse_extent(w).map_err(|e| format!("width: {}", e))?;
    let h = parse_extent(h).map_err(|e| format!("height: {}", e))?;
    Ok((at, [w, h]))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            engine,
            frames,
            host_hz,
            hide_at,
            show_at,
            resize,
        } => run::run(run::RunArgs {
            engine: engine.into(),
            host_hz,
            frames,
            hide_at,
            show_at,
            resize,
        }),
        Commands::Snapshot {
            engine,
            output,
            frames,
            host_hz,
        } => snapshot::run(snapshot::SnapshotArgs {
            engine: engine.into(),
            output,
            frames,
            host_hz,
        }),
        Commands::Tier { engine } => tier::run(engine.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variant_names() {
        assert_eq!(parse_variant("layered"), Ok(Variant::Layered));
        assert!(parse_variant("sparkles").is_err());
    }

    #[test]
    fn parses_bounded_extent() {
        assert_eq!(parse_extent("640"), Ok(640.0));
        assert_eq!(parse_extent("16384"), Ok(MAX_EXTENT));
        assert!(parse_extent("1e9").is_err());
        assert!(parse_extent("-1").is_err());
        assert!(parse_extent("inf").is_err());
        assert!(parse_extent("NaN").is_err());
        assert!(Cli::try_parse_from(["drift", "snapshot", "--width", "1e9"]).is_err());
        assert!(Cli::try_parse_from(["drift", "run", "--height", "100000"]).is_err());
    }

    #[test]
    fn parses_resize_argument() {
        assert_eq!(parse_resize("120:800x600"), Ok((120, [800.0, 600.0])));
        assert!(parse_resize("800x600").is_err());
        assert!(parse_resize("1:800").is_err());
        assert!(parse_resize("a:1x1").is_err());
        assert!(parse_resize("1:1e9x600").is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "drift", "run", "--frames", "10", "--width", "640", "--hide-at", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { engine, frames, hide_at, .. } => {
                assert_eq!(frames, 10);
                assert_eq!(hide_at, Some(3));
                assert_eq!(engine.width, 640.0);
                assert_eq!(engine.height, 1080.0);
            }
            _ => panic!("expected run"),
        }
        assert!(Cli::try_parse_from(["drift", "tier", "--reduced-motion"]).is_ok());
        assert!(Cli::try_parse_from(["drift", "snapshot", "--variant", "nope"]).is_err());
    }
}
