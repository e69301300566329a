use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use raster_fingerprint::fingerprint::{
    Algorithm, FingerprintConfig, FingerprintPipeline, HsvChannel, LumaFallback,
    config::{DEFAULT_FLAT_EPSILON, DEFAULT_SIGNIFICANT_DIGITS},
};
use raster_fingerprint::logger;

use tracing::info;

/// Compute a rendering-tolerant fingerprint of a PNG, JPEG or BMP image (optionally gzipped).
#[derive(Parser, Debug)]
#[command(name = "raster-fingerprint", version, about)]
struct Cli {
    /// Image to fingerprint; only the first file is used
    files: Vec<PathBuf>,

    /// Fingerprint algorithm: `dct` or `original`
    #[arg(short, long, default_value_t = Algorithm::Dct)]
    algorithm: Algorithm,

    /// HSV channel used as intensity: `value`, `hue` or `saturation`
    #[arg(long, default_value = "value")]
    channel: HsvChannel,

    /// Luma weights when the HSV channel is flat: `corrected` or `legacy`
    #[arg(long, default_value = "corrected")]
    luma_fallback: LumaFallback,

    /// Range below which the HSV channel counts as flat
    #[arg(long, default_value_t = DEFAULT_FLAT_EPSILON)]
    flat_epsilon: f64,

    /// Significant digits kept after each transform
    #[arg(long, default_value_t = DEFAULT_SIGNIFICANT_DIGITS)]
    digits: u32,

    /// Print the fingerprint as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let config = FingerprintConfig::builder()
        .algorithm(cli.algorithm)
        .channel(cli.channel)
        .luma_fallback(cli.luma_fallback)
        .flat_epsilon(cli.flat_epsilon)
        .significant_digits(cli.digits)
        .build();
    let pipeline = FingerprintPipeline::new(config);

    info!("Algorithm: {}", pipeline.config().algorithm);

    let fingerprint = pipeline
        .fingerprint_files(&cli.files)
        .context("fingerprinting failed")?;

    if cli.json {
        println!("{}", serde_json::to_string(&fingerprint)?);
    } else {
        println!("{fingerprint}");
    }

    Ok(())
}
