use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use geo_trilat::{run_files, TrilaterationConfig, Trilaterator};

/// Trilaterate samples recorded as distances to three referenced GPS points.
///
/// Input rows: name, dist1, dist2, dist3 (meters), long1, lat1, long2, lat2,
/// long3, lat3 (decimal degrees), comma-separated without a header.
/// Output: tab-separated name, long, lat with a header row.
#[derive(Parser, Debug)]
#[command(name = "geo-trilat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file
    #[arg(short, long)]
    input: PathBuf,

    /// Output TSV file
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = TrilaterationConfig::from_env().context("failed to load configuration")?;
    let trilaterator = Trilaterator::from_config(&config);

    run_files(&cli.input, &cli.output, &trilaterator)
        .with_context(|| format!("failed to trilaterate '{}'", cli.input.display()))?;

    Ok(())
}
