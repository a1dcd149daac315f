// SPDX-License-Identifier: BUSL-1.1
//! # wbd-api — Axum API for the Water-Borne Disease Dashboard
//!
//! Serves the Northeast India disease dataset, the map markers derived from
//! it, the full dashboard view-model, and a proxy to the external forecast
//! predictor.
//!
//! ## API Surface
//!
//! | Path                   | Module                  | Domain                    |
//! |------------------------|-------------------------|---------------------------|
//! | `/diseases`            | [`routes::diseases`]    | Dataset queries           |
//! | `/map-data`            | [`routes::map_data`]    | Map viewport and markers  |
//! | `/v1/dashboard`        | [`routes::dashboard`]   | Derived view (dataset)    |
//! | `/v1/forecast`         | [`routes::forecast`]    | Derived view (predictor)  |
//! | `/v1/forecast/targets` | [`routes::forecast`]    | Predictor targets         |
//! | `/health/*`            | this module             | Liveness and readiness    |
//! | `/metrics`             | this module             | Prometheus scrape         |
//! | `/openapi.json`        | [`openapi`]             | OpenAPI document          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// The metrics middleware and `/metrics` are only mounted when
/// `config.metrics_enabled` is set.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = state.config.metrics_enabled;

    let mut api = Router::new()
        .merge(routes::diseases::router())
        .merge(routes::map_data::router())
        .merge(routes::dashboard::router())
        .merge(routes::forecast::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    if metrics_on {
        api = api
            .route("/metrics", get(prometheus_metrics))
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics));
    }

    api.layer(TraceLayer::new_for_http()).with_state(state)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Dataset gauges are refreshed from `AppState` on each scrape.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    let repo = &state.repository;
    metrics.set_dataset_size(repo.state_count(), repo.district_count(), repo.disease_count());
    metrics.set_forecast_configured(state.forecast.is_some());

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 "ready" once a non-empty dataset is loaded.
///
/// The predictor is not probed; without it forecast requests report
/// `Unavailable` while the dataset endpoints keep serving.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.repository.state_count() == 0 {
        return (StatusCode::SERVICE_UNAVAILABLE, "dataset empty").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
