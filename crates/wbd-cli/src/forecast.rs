// SPDX-License-Identifier: BUSL-1.1
//! # Forecast Subcommand
//!
//! `wbd forecast` asks the predictor for one state, target and date, and
//! prints the derived view. `wbd targets` lists the predictor targets.
//!
//! The predictor call is bounded by `--timeout-secs`; a timeout or any
//! predictor failure exits with status 1.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use wbd_core::{DiseaseKey, StateId};
use wbd_forecast_client::{targets, ForecastAdapter, DEFAULT_TARGET};
use wbd_view::{DashboardController, DashboardView, ForecastSource, SelectionState, ViewStatus};

use crate::context::CliContext;
use crate::render::{render_view, OutputFormat};

/// Arguments for `wbd forecast`.
#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// State id (`arunachal-pradesh`) or display name (`"Arunachal Pradesh"`).
    #[arg(long)]
    pub state: String,

    /// Forecast date, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: String,

    /// Predictor target.
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Case-insensitive district filter for the table.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Ask the predictor for the state total instead of summing districts.
    #[arg(long)]
    pub delegate_total: bool,

    /// Upper bound on the predictor call.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Fetch predictions through `adapter` and derive the view.
pub async fn forecast_view<A: ForecastAdapter + 'static>(
    adapter: Arc<A>,
    ctx: &CliContext,
    args: &ForecastArgs,
) -> Result<DashboardView> {
    let repository = ctx.repository()?;
    let gazetteer = Arc::new(ctx.gazetteer()?);
    let selection = SelectionState {
        state: StateId::new(args.state.trim()),
        disease: DiseaseKey::new(args.target.trim()),
        search_term: args.search.clone(),
    };
    let source = ForecastSource::new(adapter, repository, args.date.as_str())
        .with_delegated_total(args.delegate_total);
    let mut controller = DashboardController::new(source, gazetteer, selection);

    let timeout = Duration::from_secs(args.timeout_secs.max(1));
    let refreshed = tokio::time::timeout(timeout, controller.refresh()).await;
    if refreshed.is_err() {
        bail!("predictor did not answer within {}s", timeout.as_secs());
    }
    Ok(controller.view())
}

pub fn run_forecast(args: &ForecastArgs, ctx: &CliContext) -> Result<u8> {
    let client = Arc::new(ctx.forecast_client()?);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let view = runtime.block_on(forecast_view(client, ctx, args))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print!("{}", render_view(&view)),
    }
    if view.status != ViewStatus::Ready {
        tracing::error!(
            state = %view.selection.state,
            status = ?view.status,
            "forecast unavailable"
        );
        return Ok(1);
    }
    Ok(0)
}

/// `key  name` per predictor target.
pub fn run_targets() -> Result<u8> {
    for t in targets() {
        let marker = if t.key == DEFAULT_TARGET { " (default)" } else { "" };
        println!("{:<24}  {}{marker}", t.key, t.name);
    }
    Ok(0)
}
