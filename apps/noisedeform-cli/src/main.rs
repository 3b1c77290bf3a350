use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::{DMat4, DVec3};
use tracing_subscriber::EnvFilter;

use noisedeform_noise::{Fbm, Simplex, noise3};
use noisedeform_preset::{DeformerPreset, PointSet};

#[derive(Parser)]
#[command(name = "noisedeform-cli", about = "CLI driver for the fBm noise deformer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and default parameters
    Info,
    /// Sample the raw noise primitive at one point
    Noise {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
    },
    /// Sample the fBm series at one point
    Fbm {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
        /// Number of octaves (clamped to at least 1)
        #[arg(short, long, default_value = "1")]
        octaves: u32,
        /// Frequency multiplier per octave
        #[arg(short, long, default_value = "2.0", allow_hyphen_values = true)]
        lacunarity: f64,
        /// Amplitude multiplier per octave
        #[arg(short, long, default_value = "0.5", allow_hyphen_values = true)]
        persistence: f64,
    },
    /// Push one object-space point through the deformer
    Displace {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
        /// Painted weight of the point
        #[arg(short, long, default_value = "1.0")]
        weight: f64,
        /// Preset file (.yaml, .yml or .json); defaults when omitted
        #[arg(long)]
        preset: Option<PathBuf>,
    },
    /// Deform every point in a point file
    Deform {
        /// Input point file (.yaml, .yml or .json)
        #[arg(short, long)]
        input: PathBuf,
        /// Output point file (.yaml, .yml or .json)
        #[arg(short, long)]
        output: PathBuf,
        /// Preset file (.yaml, .yml or .json); defaults when omitted
        #[arg(long)]
        preset: Option<PathBuf>,
    },
    /// Write a preset file with default settings
    Preset {
        /// Destination (.yaml, .yml or .json)
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn load_preset(path: Option<&Path>) -> anyhow::Result<DeformerPreset> {
    match path {
        Some(p) => DeformerPreset::load(p)
            .with_context(|| format!("failed to load preset {}", p.display())),
        None => Ok(DeformerPreset::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let defaults = DeformerPreset::default();
            println!("noisedeform-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", noisedeform_kernel::crate_info());
            println!("preset: {}", noisedeform_preset::crate_info());
            println!(
                "defaults: amplitude={} frequency={} offset={} octaves={} lacunarity={} persistence={}",
                defaults.params.amplitude,
                defaults.params.frequency,
                defaults.params.offset,
                defaults.params.octaves,
                defaults.params.lacunarity,
                defaults.params.persistence
            );
            println!(
                "envelope={} num_tasks={}",
                defaults.envelope, defaults.num_tasks
            );
        }
        Commands::Noise { x, y, z } => {
            println!("{}", noise3(x, y, z));
        }
        Commands::Fbm {
            x,
            y,
            z,
            octaves,
            lacunarity,
            persistence,
        } => {
            let series = Fbm::new(octaves.max(1), lacunarity, persistence);
            let value = series.sample(&Simplex, DVec3::new(x, y, z));
            println!("{value}");
            tracing::debug!(bound = series.amplitude_bound(), "fbm amplitude bound");
        }
        Commands::Displace {
            x,
            y,
            z,
            weight,
            preset,
        } => {
            let preset = load_preset(preset.as_deref())?;
            let mut deformer = preset.deformer();
            let input = DVec3::new(x, y, z);
            let output = deformer.displace(
                input,
                weight,
                DMat4::IDENTITY,
                preset.locator.to_matrix(),
            );
            println!("{} {} {}", output.x, output.y, output.z);
            tracing::debug!(?input, ?output, "displaced point");
        }
        Commands::Deform {
            input,
            output,
            preset,
        } => {
            let preset = load_preset(preset.as_deref())?;
            let mut set = PointSet::load(&input)
                .with_context(|| format!("failed to read points from {}", input.display()))?;
            let weights = set.weights().to_vec();

            let mut deformer = preset.deformer();
            let stats = deformer.deform(
                &mut set.points,
                &weights,
                DMat4::IDENTITY,
                preset.locator.to_matrix(),
            );

            set.save(&output)
                .with_context(|| format!("failed to write points to {}", output.display()))?;
            tracing::info!(
                displaced = stats.displaced,
                skipped = stats.skipped,
                tasks = stats.tasks,
                elapsed = ?stats.elapsed,
                "deformed {} -> {}",
                input.display(),
                output.display()
            );
        }
        Commands::Preset { output } => {
            DeformerPreset::default()
                .save(&output)
                .with_context(|| format!("failed to write preset {}", output.display()))?;
            tracing::info!("preset written to {}", output.display());
        }
    }

    Ok(())
}
