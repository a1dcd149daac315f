// SPDX-License-Identifier: BUSL-1.1
//! # Forecast Proxy
//!
//! `POST /v1/forecast` fetches per-district predictions for one state,
//! target and date, and returns the derived dashboard view. A missing
//! predictor, a predictor failure or a timeout all produce `200` with
//! `status = Unavailable` and an empty view. Only a malformed request body
//! is rejected (422).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wbd_core::{DashboardError, DiseaseKey, StateId};
use wbd_forecast_client::{targets, DEFAULT_TARGET};
use wbd_view::{DashboardController, DashboardView, ForecastSource, SelectionState, ViewStatus};

use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Forecast request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForecastRequest {
    /// State id (`arunachal-pradesh`) or display name (`Arunachal Pradesh`).
    pub state: String,
    /// Predictor target. Defaults to `diarrhea_cases`.
    #[serde(default = "default_target")]
    pub target: String,
    /// Forecast date, `YYYY-MM-DD`.
    pub date: String,
    /// Case-insensitive district filter for the table.
    #[serde(default)]
    pub search: String,
    /// Ask the predictor for the state total instead of summing districts.
    #[serde(default)]
    pub delegate_total: bool,
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

impl ForecastRequest {
    fn validate(&self) -> Result<(), String> {
        if self.state.trim().is_empty() {
            return Err("state must not be empty".to_string());
        }
        if self.target.trim().is_empty() {
            return Err("target must not be empty".to_string());
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| format!("date {:?} must be YYYY-MM-DD", self.date))?;
        Ok(())
    }
}

/// Target catalogue entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TargetEntry {
    pub key: String,
    pub name: String,
}

/// Response of `GET /v1/forecast/targets`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetsResponse {
    /// Whether a predictor is configured.
    pub configured: bool,
    pub default_target: String,
    pub targets: Vec<TargetEntry>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/forecast", post(run_forecast))
        .route("/v1/forecast/targets", get(list_targets))
}

/// POST /v1/forecast — Dashboard view from predictor output.
#[utoipa::path(
    post,
    path = "/v1/forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Dashboard view; `status` is Unavailable when the predictor cannot answer"),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "forecast"
)]
async fn run_forecast(
    State(state): State<AppState>,
    metrics: Option<Extension<ApiMetrics>>,
    body: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<DashboardView>, AppError> {
    let Json(req) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    req.validate().map_err(AppError::Validation)?;

    let selection = SelectionState {
        state: StateId::new(req.state.trim()),
        disease: DiseaseKey::new(req.target.trim()),
        search_term: req.search,
    };

    let (view, outcome) = match &state.forecast {
        None => (
            DashboardView::failed(
                selection,
                &DashboardError::Transport("forecast predictor is not configured".into()),
            ),
            "not_configured",
        ),
        Some(client) => {
            let source = ForecastSource::new(client.clone(), state.repository.clone(), req.date)
                .with_delegated_total(req.delegate_total);
            let mut controller =
                DashboardController::new(source, state.gazetteer.clone(), selection.clone());
            let timeout = state.config.forecast_timeout;
            let refreshed = tokio::time::timeout(timeout, controller.refresh()).await;
            match refreshed {
                Ok(_) => {
                    let view = controller.view();
                    let outcome = match view.status {
                        ViewStatus::Ready => "ready",
                        ViewStatus::NotFound => "not_found",
                        ViewStatus::Unavailable | ViewStatus::Pending => "unavailable",
                    };
                    (view, outcome)
                }
                Err(_) => {
                    tracing::warn!(timeout_secs = timeout.as_secs(), "predictor timed out");
                    (
                        DashboardView::failed(
                            selection,
                            &DashboardError::Transport(format!(
                                "predictor did not answer within {}s",
                                timeout.as_secs()
                            )),
                        ),
                        "timeout",
                    )
                }
            }
        }
    };

    if let Some(Extension(m)) = metrics {
        m.record_forecast(outcome);
    }
    Ok(Json(view))
}

/// GET /v1/forecast/targets — Predictor targets.
#[utoipa::path(
    get,
    path = "/v1/forecast/targets",
    responses(
        (status = 200, description = "Target catalogue", body = TargetsResponse),
    ),
    tag = "forecast"
)]
async fn list_targets(State(state): State<AppState>) -> Json<TargetsResponse> {
    Json(TargetsResponse {
        configured: state.forecast.is_some(),
        default_target: DEFAULT_TARGET.to_string(),
        targets: targets()
            .into_iter()
            .map(|t| TargetEntry {
                key: t.key,
                name: t.name,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(state: &str, target: &str, date: &str) -> ForecastRequest {
        ForecastRequest {
            state: state.into(),
            target: target.into(),
            date: date.into(),
            search: String::new(),
            delegate_total: false,
        }
    }

    #[test]
    fn validation() {
        assert!(request("Assam", "diarrhea_cases", "2023-12-12").validate().is_ok());
        assert!(request(" ", "diarrhea_cases", "2023-12-12").validate().is_err());
        assert!(request("Assam", "", "2023-12-12").validate().is_err());
        assert!(request("Assam", "je_cases", "2023-02-30").validate().is_err());
    }

    #[test]
    fn target_defaults() {
        let req: ForecastRequest =
            serde_json::from_str(r#"{"state":"assam","date":"2023-12-12"}"#).unwrap();
        assert_eq!(req.target, "diarrhea_cases");
        assert!(!req.delegate_total);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<ForecastRequest, _> =
            serde_json::from_str(r#"{"state":"assam","date":"2023-12-12","model":"x"}"#);
        assert!(parsed.is_err());
    }
}
