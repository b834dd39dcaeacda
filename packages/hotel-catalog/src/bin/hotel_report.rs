//! Hotel report CLI
//!
//! Loads the hotel list and every review file below the review directory,
//! then writes the report sorted by hotel id.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: input/hotels.json, input/reviews, output/results.txt
//! cargo run --bin hotel-report --release
//!
//! # Explicit paths
//! cargo run --bin hotel-report -- --hotels data/hotels.json --reviews data/reviews --output out.txt
//!
//! # From a config file, parsing sequentially
//! cargo run --bin hotel-report -- --config catalog.yaml --sequential
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hotel_catalog::{load_catalog, write_report, CatalogConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotel-report")]
#[command(about = "Index hotels and reviews and write a per-hotel report", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hotel list JSON file
    #[arg(long)]
    hotels: Option<PathBuf>,

    /// Root directory of the review files
    #[arg(short, long)]
    reviews: Option<PathBuf>,

    /// Report destination
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse review files on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::from_yaml(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CatalogConfig::default(),
        };
        config = config.apply_env()?;

        if let Some(path) = &self.hotels {
            config = config.hotels_file(path);
        }
        if let Some(path) = &self.reviews {
            config = config.reviews_dir(path);
        }
        if let Some(path) = &self.output {
            config = config.output_file(path);
        }
        if self.sequential {
            config = config.parallel(false);
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.resolve_config()?;
    let (catalog, summary) = load_catalog(&config)?;

    let written = write_report(&catalog, &config.output_file)?;
    if written {
        println!(
            "{} hotels, {} reviews -> {}",
            catalog.hotel_count(),
            catalog.review_count(),
            config.output_file.display()
        );
    } else {
        println!("No hotels loaded; no report written");
    }
    println!("{}", summary);

    Ok(())
}
