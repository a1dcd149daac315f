// SPDX-License-Identifier: BUSL-1.1
//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "WBD API — Water-Borne Disease Dashboard",
        version = "0.1.0",
        description = "District-level water-borne disease cases for the eight Northeast India states.\n\nProvides:\n- **Dataset queries** by state, by disease, or both\n- **Map data** with risk-classified district markers\n- **Dashboard views** (table, summary statistics, markers) derived from the dataset\n- **Forecast proxy** deriving the same view from an external predictor",
        license(name = "BUSL-1.1")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Dataset ─────────────────────────────────────────────────────
        crate::routes::diseases::get_diseases,
        crate::routes::map_data::get_map_data,
        // ── Dashboard ───────────────────────────────────────────────────
        crate::routes::dashboard::get_dashboard,
        // ── Forecast ────────────────────────────────────────────────────
        crate::routes::forecast::run_forecast,
        crate::routes::forecast::list_targets,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::routes::map_data::MapDataResponse,
            crate::routes::map_data::MapDataMarker,
            crate::routes::forecast::ForecastRequest,
            crate::routes::forecast::TargetEntry,
            crate::routes::forecast::TargetsResponse,
        ),
    ),
    tags(
        (name = "dataset", description = "Static disease dataset and map markers"),
        (name = "dashboard", description = "Dashboard view derived from the static dataset"),
        (name = "forecast", description = "Dashboard view derived from the external predictor"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
