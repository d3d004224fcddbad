//! Command line front end for the sea breeze comparator.
//!
//! Loads the dataset once, applies the location and time selection, and writes the
//! result for a renderer to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use seabreeze::{
    open_dataset, tools::date::format_timestamp, AppConfig, SeaBreezeError, Session,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Map slice and series as one JSON document
    Json,
    /// Temperature contours, wind arrows and region boxes
    Geojson,
    /// Sea and land series only
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "seabreeze")]
#[command(about = "Compare land and sea near-surface temperature around a coastal location")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset path, overriding the configuration
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Location name from the catalog
    #[arg(short, long)]
    location: Option<String>,

    /// Time index to show on the map
    #[arg(short, long)]
    time_index: Option<usize>,

    /// List the location catalog and exit
    #[arg(long)]
    list_locations: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(dataset) = &args.dataset {
        config.dataset = dataset.clone();
    }

    if args.list_locations {
        let mut stdout = io::stdout().lock();
        for location in &config.locations {
            writeln!(stdout, "{}\t{}\t{}", location.name, location.longitude, location.latitude)?;
        }
        return Ok(());
    }

    let dataset = open_dataset(&config.dataset)
        .with_context(|| format!("failed to open dataset {}", config.dataset.display()))?;

    let mut session = Session::from_config(dataset, &config)?;
    if let Some(name) = &args.location {
        session.select_location(name)?;
    }
    if let Some(index) = args.time_index {
        session.select_time(index)?;
    }

    let comparison = match session.render() {
        Ok(comparison) => comparison,
        Err(err @ SeaBreezeError::EmptyRegion { .. }) => {
            warn!("{err}; choose a location inside the dataset bounds");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let (sea, land) = comparison.series.selected_values();
    info!(
        location = %comparison.location.name,
        time = %format_timestamp(&comparison.series.selected_time),
        sea,
        land,
        "rendered comparison"
    );
    if let Some((index, contrast)) = comparison.series.peak_contrast() {
        info!(
            time = %format_timestamp(&comparison.series.times[index]),
            contrast,
            "peak land minus sea contrast"
        );
    }

    let stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Json => serde_json::to_writer(stdout, &comparison)?,
        OutputFormat::Geojson => {
            let collection = comparison.to_feature_collection(config.contour_levels)?;
            serde_json::to_writer(stdout, &collection)?
        }
        OutputFormat::Csv => comparison.series.write_csv(stdout)?,
    }

    Ok(())
}
