use std::path::PathBuf;

use clap::Parser;

use floodlens::configuration::LoggingConfig;
use floodlens::flood_geojson::{self, DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Converts district flood-impact CSV records into GeoJSON points.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// CSV with Latitude and Longitude columns.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Destination GeoJSON file.
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    floodlens::logging::init(&LoggingConfig::default())?;

    let count = flood_geojson::convert_file(&args.input, &args.output)?;
    log::info!(
        "converted {} features from {} to {}",
        count,
        args.input.display(),
        args.output.display()
    );
    Ok(())
}
