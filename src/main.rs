use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Parser, Subcommand};
use delivery_batching::models::{Batch, Coordinate};
use delivery_batching::{
    BatchCatalogService, BatchingConfig, Geocoder, HashGeocoder, InMemoryOrderStore,
    StaticGeocoder,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "delivery-batching",
    about = "Batch ready orders into multi-stop trips and rank them by earnings per minute"
)]
struct Cli {
    /// JSON file with batching configuration (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file mapping addresses to coordinates. Without it addresses are
    /// hashed into a demo service area.
    #[arg(long, global = true)]
    addresses: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List ranked batches for one or more partners
    Batches {
        /// JSON file with the order snapshot
        #[arg(long)]
        orders: PathBuf,
        /// Partner location as `lat,lng`; repeat to serve several partners
        #[arg(long = "partner", required = true, allow_hyphen_values = true, value_parser = parse_coordinate)]
        partners: Vec<Coordinate>,
        /// Override the configured maximum batch size
        #[arg(long)]
        max_batch_size: Option<usize>,
    },
    /// Recompute the route of a batch from the partner's position
    Optimize {
        /// JSON file with the order snapshot
        #[arg(long)]
        orders: PathBuf,
        /// Batch id as returned by `batches` (comma-joined order ids)
        #[arg(long)]
        batch_id: String,
        /// Partner location as `lat,lng`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
        partner: Coordinate,
    },
}

#[derive(Serialize)]
struct PartnerCatalog {
    partner: Coordinate,
    batches: Vec<Batch>,
}

fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got `{}`", value))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude `{}`: {}", lat, e))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude `{}`: {}", lng, e))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(format!("coordinate `{}` is out of range", value));
    }
    Ok(Coordinate::new(lat, lng))
}

fn build_service(
    cli: &Cli,
    orders: &Path,
) -> Result<BatchCatalogService<InMemoryOrderStore, Box<dyn Geocoder>>, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => BatchingConfig::from_json_file(path)?,
        None => BatchingConfig::default(),
    };

    let geocoder: Box<dyn Geocoder> = match &cli.addresses {
        Some(path) => {
            let geocoder = StaticGeocoder::from_json_file(path)?;
            info!(addresses = geocoder.len(), "loaded address table");
            Box::new(geocoder)
        }
        None => Box::new(HashGeocoder::default()),
    };

    let store = InMemoryOrderStore::from_json_file(orders)?;
    if store.is_empty() {
        warn!(path = %orders.display(), "order snapshot is empty");
    } else {
        info!(orders = store.len(), path = %orders.display(), "loaded order snapshot");
    }

    Ok(BatchCatalogService::new(store, geocoder, config)?)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    match &cli.command {
        Commands::Batches {
            orders,
            partners,
            max_batch_size,
        } => {
            let service = build_service(cli, orders)?;

            // Each partner request is independent; serve them side by side
            let catalogs = partners
                .par_iter()
                .map(|&partner| {
                    service
                        .get_available_batches(partner, *max_batch_size)
                        .map(|batches| PartnerCatalog { partner, batches })
                })
                .collect::<Result<Vec<_>, _>>()?;

            println!("{}", serde_json::to_string_pretty(&catalogs)?);
        }
        Commands::Optimize {
            orders,
            batch_id,
            partner,
        } => {
            let service = build_service(cli, orders)?;
            let route = service.optimize_route(batch_id, *partner)?;

            println!("{}", serde_json::to_string_pretty(&route)?);
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{}", e);
        exit(1);
    }
}
