//! CLI entry point for the stationboard checks.
//!
//! Two one-shot diagnostics against a public transit stationboard API:
//! a prognosis consistency check and a cancellation detector. Both are
//! fail-fast: any fetch or parse fault aborts the run with a non-zero exit.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use stationboard_checks::cancelled::find_cancelled;
use stationboard_checks::fetch::{BasicClient, fetch_bytes, stationboard_url};
use stationboard_checks::output::{render_cancelled, render_prognosis_report};
use stationboard_checks::parser::parse_stationboard;
use stationboard_checks::prognosis::check_prognosis;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const API_BASE: &str = "https://transport.opendata.ch/v1/stationboard";

#[derive(Parser)]
#[command(name = "stationboard-checks")]
#[command(about = "Consistency checks against a public stationboard API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare scheduled+delay against the API's own prognosis per departure
    CheckPrognosis {
        /// Stations to audit, processed in the given order
        #[arg(
            long = "station",
            default_values_t = ["Roswiesen".to_string(), "Heerenwiesen".to_string()]
        )]
        stations: Vec<String>,

        /// Maximum departures to request per station
        #[arg(long, default_value_t = 100)]
        limit: u32,

        /// Stationboard API endpoint
        #[arg(long, default_value = API_BASE)]
        api: String,
    },
    /// Flag departures that look cancelled within the next hour
    FindCancelled {
        /// Station to watch
        #[arg(long, default_value = "Roswiesen")]
        station: String,

        /// Maximum departures to request
        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// Stationboard API endpoint
        #[arg(long, default_value = API_BASE)]
        api: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::CheckPrognosis {
            stations,
            limit,
            api,
        } => {
            let client = BasicClient::new();

            let mut entries = Vec::new();
            for station in &stations {
                let url = stationboard_url(&api, station, limit)?;
                info!(station = %station, "Fetching stationboard");
                let bytes = fetch_bytes(&client, url).await?;
                debug!(bytes = bytes.len(), "Stationboard bytes received");

                let board = parse_stationboard(&bytes)?;
                info!(
                    station = %station,
                    departures = board.stationboard.len(),
                    "Stationboard parsed"
                );
                entries.extend(
                    board
                        .stationboard
                        .into_iter()
                        .map(|dep| (station.clone(), dep)),
                );
            }

            let report = check_prognosis(&entries)?;
            print!("{}", render_prognosis_report(&report));
        }
        Commands::FindCancelled {
            station,
            limit,
            api,
        } => {
            let client = BasicClient::new();

            let url = stationboard_url(&api, &station, limit)?;
            info!(station = %station, "Fetching stationboard");
            let bytes = fetch_bytes(&client, url).await?;
            debug!(bytes = bytes.len(), "Stationboard bytes received");

            let board = parse_stationboard(&bytes)?;
            info!(departures = board.stationboard.len(), "Stationboard parsed");

            let verdicts = find_cancelled(&board.stationboard, Utc::now())?;
            print!("{}", render_cancelled(&verdicts));
        }
    }

    Ok(())
}
