// SPDX-License-Identifier: BUSL-1.1
//! # wbd CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wbd_cli::forecast::{run_forecast, run_targets, ForecastArgs};
use wbd_cli::query::{run_query, run_states, QueryArgs};
use wbd_cli::validate::{run_validate, ValidateArgs};
use wbd_cli::view::{run_view, Section, ViewArgs};
use wbd_cli::CliContext;

/// Water-borne disease dashboard for Northeast India.
///
/// Renders district tables, summary statistics and map markers from the
/// built-in dataset, a dataset file, or an external predictor.
#[derive(Parser, Debug)]
#[command(name = "wbd", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Dataset file (YAML or JSON) replacing the built-in dataset.
    #[arg(long, global = true, env = "WBD_DATASET_PATH")]
    dataset: Option<PathBuf>,

    /// Predictor base URL.
    #[arg(long, global = true, env = "FORECAST_API_URL")]
    forecast_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the dataset's states.
    States,

    /// Query the dataset by state, disease, or both (JSON).
    Query(QueryArgs),

    /// District table for one state and disease, highest counts first.
    Table(ViewArgs),

    /// Summary statistics for one state and disease.
    Stats(ViewArgs),

    /// Map markers for one state and disease.
    Markers(ViewArgs),

    /// Dashboard view from the external predictor.
    Forecast(ForecastArgs),

    /// List predictor targets.
    Targets,

    /// Validate a dataset file.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = CliContext {
        dataset: cli.dataset,
        forecast_url: cli.forecast_url,
    };
    tracing::debug!(?ctx, "wbd CLI starting");

    let result = match cli.command {
        Commands::States => run_states(&ctx),
        Commands::Query(args) => run_query(&args, &ctx),
        Commands::Table(args) => run_view(&args, &ctx, Section::Table),
        Commands::Stats(args) => run_view(&args, &ctx, Section::Stats),
        Commands::Markers(args) => run_view(&args, &ctx, Section::Markers),
        Commands::Forecast(args) => run_forecast(&args, &ctx),
        Commands::Targets => run_targets(),
        Commands::Validate(args) => run_validate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
