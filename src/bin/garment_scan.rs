//! Command-line interface for garment_scan
//!
//! Scans garment photos, analyzes skin tone, and builds outfit suggestions.
//! Results print to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use garment_scan::{
    CoinCalibration, Garment, GarmentPipeline, OutfitRecommender, PipelineConfig, ScanOutput,
    SkinToneAnalyzer, WhitePatch,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "garment-scan", author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a garment photo with coin and white patch calibration
    Scan {
        /// Garment photo (JPEG, PNG, WebP, ...)
        image: PathBuf,

        /// Coin calibration, e.g. '{"x": 120, "y": 80, "diameter_pixels": 81, "type": "500"}'
        #[arg(long)]
        coin: String,

        /// White patch, e.g. '{"x": 400, "y": 60, "radius": 30}'
        #[arg(long)]
        patch: String,

        /// Write the encoded WebP here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pipeline configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Scan without calibration (generic coin, no white balance)
    Quick {
        image: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Estimate skin tone from a face photo
    SkinTone { image: PathBuf },

    /// Match wardrobe garments to an item color
    Instant {
        /// Item color as #rrggbb
        #[arg(long)]
        item_color: String,

        /// JSON array of garments
        #[arg(long)]
        garments: PathBuf,

        #[arg(long, default_value = "")]
        skin_tone: String,
    },

    /// Build a seven-day outfit plan
    Weekly {
        /// JSON array of garments
        #[arg(long)]
        garments: PathBuf,

        #[arg(long, default_value = "")]
        skin_tone: String,
    },

    /// Write the default pipeline configuration
    InitConfig { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            image,
            coin,
            patch,
            output,
            config,
        } => {
            let coin: CoinCalibration =
                serde_json::from_str(&coin).context("Invalid JSON in coin calibration")?;
            let patch: WhitePatch =
                serde_json::from_str(&patch).context("Invalid JSON in white patch")?;
            let pipeline = load_pipeline(config.as_deref())?;
            let bytes = read_image(&image)?;

            let result = pipeline
                .process(&bytes, &coin, &patch)
                .with_context(|| format!("Failed to scan {}", image.display()))?;
            finish_scan(result, output.as_deref())
        }
        Commands::Quick {
            image,
            output,
            config,
        } => {
            let pipeline = load_pipeline(config.as_deref())?;
            let bytes = read_image(&image)?;

            let result = pipeline
                .quick_scan(&bytes)
                .with_context(|| format!("Failed to scan {}", image.display()))?;
            finish_scan(result, output.as_deref())
        }
        Commands::SkinTone { image } => {
            let bytes = read_image(&image)?;
            let report = SkinToneAnalyzer::new()
                .analyze(&bytes)
                .with_context(|| format!("Failed to analyze {}", image.display()))?;
            print_json(&report)
        }
        Commands::Instant {
            item_color,
            garments,
            skin_tone,
        } => {
            let garments: Vec<Garment> = read_json(&garments)?;
            let result = OutfitRecommender::new().instant_match(&item_color, &skin_tone, &garments)?;
            print_json(&result)
        }
        Commands::Weekly {
            garments,
            skin_tone,
        } => {
            let garments: Vec<Garment> = read_json(&garments)?;
            let plan = OutfitRecommender::new().weekly_plan(&garments, &skin_tone)?;
            if let Some(message) = plan.error() {
                tracing::warn!("{}", message);
            }
            print_json(&plan)
        }
        Commands::InitConfig { path } => {
            PipelineConfig::default()
                .to_json_file(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

fn load_pipeline(config: Option<&Path>) -> Result<GarmentPipeline> {
    let config = match config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    Ok(GarmentPipeline::from_config(config))
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn finish_scan(result: ScanOutput, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, &result.image)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Saved {} bytes to {}", result.image.len(), path.display());
    }
    print_json(&result.metadata)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
