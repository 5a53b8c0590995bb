//! seatcupra-inspect - Print the attribute snapshot of a Seat/Cupra vehicle
//!
//! Builds the vehicle from a vendor payload (optionally on top of an earlier
//! payload) and prints the flat attribute list as JSON.

mod config;

use anyhow::{Context, Result};
use carconn_model::{AttributeEntry, Snapshot};
use carconn_seatcupra::{SeatCupraVehicle, TracingDiagnostics, VehiclePayload};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::InspectConfig;

#[derive(Parser)]
#[command(name = "seatcupra-inspect")]
#[command(author, version, about = "Seat/Cupra vehicle snapshot inspector")]
struct Cli {
    /// Vendor payload to apply (JSON)
    #[arg(short, long)]
    payload: PathBuf,

    /// Earlier payload the vehicle is built from first (JSON)
    #[arg(short, long)]
    origin: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "SEATCUPRA_INSPECT_CONFIG")]
    config: Option<PathBuf>,

    /// Only print attributes added by the Seat/Cupra connector
    #[arg(long)]
    custom_only: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InspectConfig::load_from(path)?,
        None => InspectConfig::default(),
    };
    let merged = config.merge_with_args(cli.custom_only, cli.verbose);

    // RUST_LOG wins unless --verbose asks for debug output
    let filter = if cli.verbose {
        EnvFilter::new(&merged.log_filter)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&merged.log_filter))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let diagnostics = TracingDiagnostics;

    let previous = match &cli.origin {
        Some(path) => {
            let origin = read_payload(path)?;
            let vehicle = SeatCupraVehicle::refresh(None, &origin, &diagnostics)
                .with_context(|| format!("Failed to build vehicle from {}", path.display()))?;
            Some(vehicle)
        }
        None => None,
    };

    let payload = read_payload(&cli.payload)?;
    let vehicle = SeatCupraVehicle::refresh(previous.as_ref(), &payload, &diagnostics)
        .with_context(|| format!("Failed to apply {}", cli.payload.display()))?;

    tracing::info!(
        vin = vehicle.vin(),
        powertrain = ?vehicle.powertrain(),
        "Built vehicle snapshot"
    );

    let entries: Vec<AttributeEntry> = if merged.custom_only {
        vehicle.custom_attributes()
    } else {
        vehicle.snapshot()
    };

    let output = if merged.pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    println!("{}", output);

    Ok(())
}

fn read_payload(path: &Path) -> Result<VehiclePayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload file: {}", path.display()))?;
    VehiclePayload::from_json(&content)
        .with_context(|| format!("Failed to parse payload file: {}", path.display()))
}
