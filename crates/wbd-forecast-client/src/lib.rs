// SPDX-License-Identifier: BUSL-1.1
//! # wbd-forecast-client — Typed Client for the Disease Predictor
//!
//! The dashboard can source case counts from an external model service
//! instead of the static dataset. This crate is the only code that talks
//! to that service.
//!
//! ## Endpoints
//!
//! | Method | Path                    | Body                        | Success response          |
//! |--------|-------------------------|-----------------------------|---------------------------|
//! | POST   | `/predict_state`        | `{state, target, date}`     | `{predictions: [...]}`    |
//! | POST   | `/total_cases_by_state` | `{state, disease}`          | `{total_cases: number}`   |
//!
//! Either endpoint may answer with `{error: ...}` instead, which surfaces
//! as [`ForecastError::Upstream`].
//!
//! ## Crate Policy
//!
//! - Depends on `wbd-core` only for case counts, coordinates and the
//!   shared [`wbd_core::DashboardError`] mapping.
//! - Stateless: every call is a single request with no retry or caching.

pub mod client;
pub mod config;
pub mod error;
pub mod targets;
pub mod types;

pub use client::{ForecastAdapter, ForecastClient};
pub use config::{ConfigError, ForecastConfig, FORECAST_URL_ENV};
pub use error::ForecastError;
pub use targets::{
    pretty_target_name, target_display_name, targets, ForecastTarget, DEFAULT_TARGET,
    FORECAST_TARGETS,
};
pub use types::{PredictStateRequest, PredictionRecord, TotalCasesRequest};
