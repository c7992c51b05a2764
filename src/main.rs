//! Station Catalog Builder
//!
//! One-shot run that:
//! 1. Probes every station id in the configured range (default 1..=8000)
//! 2. Keeps stations whose observation feeds carry usable coordinates
//! 3. Ranks each accepted station against those accepted before it
//! 4. Writes the ranked catalog as a StationList XML document
//!
//! Usage:
//!   cargo run --release
//!   cargo run --release -- --first 1 --last 500 --output stations.xml
//!   cargo run --release -- --config catalog.toml
//!
//! Environment:
//!   CATALOG_CONFIG - config file path (default: catalog.toml)
//!   RUST_LOG       - diagnostic log filter (default: warn)

use station_catalog::catalog::build_catalog;
use station_catalog::config::CatalogConfig;
use station_catalog::ingest::bbc::BbcFeedClient;
use station_catalog::model::{CatalogError, FailureKind};
use station_catalog::writer::write_catalog_file;

use std::env;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Values given on the command line; each overrides the config file.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    first_id: Option<u32>,
    last_id: Option<u32>,
    output: Option<PathBuf>,
}

const DEFAULT_PROGRAM_NAME: &str = "station_catalog";

const USAGE: &str = "[--config PATH] [--first ID] [--last ID] [--output PATH]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("🌦  Station Catalog Builder");
    println!("===========================\n");

    let args: Vec<String> = env::args().collect();
    let (program, flags) = split_program(&args);
    let options = match parse_args(flags) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: {} {}", program, USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("\n❌ Catalog build failed: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("   caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(options: CliOptions) -> Result<(), CatalogError> {
    println!("📋 Loading configuration...");
    let config = apply_overrides(CatalogConfig::load(options.config.as_deref())?, &options)?;
    println!(
        "✓ Probing station ids {}..={} via {}\n",
        config.range.first_id, config.range.last_id, config.feed.url_template
    );

    let client = BbcFeedClient::new(&config.feed)?;

    println!("📥 Fetching station feeds (one at a time)...");
    let (catalog, summary) = build_catalog(&client, config.ids());

    println!("💾 Writing {} stations to {}...", catalog.len(), config.output.path.display());
    write_catalog_file(&config.output.path, catalog.records())?;

    println!("\n🎉 CATALOG COMPLETE");
    println!("===========================");
    println!("Ids probed:              {}", summary.attempted);
    println!("Stations accepted:       {}", summary.accepted);
    println!("Skipped (transport):     {}", summary.skipped_for(FailureKind::Transport));
    println!("Skipped (parse):         {}", summary.skipped_for(FailureKind::Parse));
    println!("Skipped (no coordinates): {}", summary.skipped_for(FailureKind::MissingCoordinates));
    println!("Elapsed:                 {}s", summary.elapsed().num_seconds());

    Ok(())
}

/// Splits argv into the program name and its flags. The OS may hand over an
/// empty argv, so neither part is assumed to exist.
fn split_program(args: &[String]) -> (&str, &[String]) {
    match args.split_first() {
        Some((program, flags)) => (program.as_str(), flags),
        None => (DEFAULT_PROGRAM_NAME, &[]),
    }
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{} requires a value", flag))?;

        match flag {
            "--config" => options.config = Some(PathBuf::from(value)),
            "--output" => options.output = Some(PathBuf::from(value)),
            "--first" => options.first_id = Some(parse_id(flag, value)?),
            "--last" => options.last_id = Some(parse_id(flag, value)?),
            _ => return Err(format!("unknown argument: {}", flag)),
        }
        i += 2;
    }

    Ok(options)
}

fn parse_id(flag: &str, value: &str) -> Result<u32, String> {
    value
        .parse()
        .map_err(|_| format!("{} expects a station id, got '{}'", flag, value))
}

fn apply_overrides(mut config: CatalogConfig, options: &CliOptions) -> Result<CatalogConfig, CatalogError> {
    if let Some(first) = options.first_id {
        config.range.first_id = first;
    }
    if let Some(last) = options.last_id {
        config.range.last_id = last;
    }
    if let Some(output) = &options.output {
        config.output.path = output.clone();
    }
    config.validate()?;
    Ok(config)
}
