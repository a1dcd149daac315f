// SPDX-License-Identifier: BUSL-1.1
//! # Dashboard View
//!
//! `GET /v1/dashboard` derives the full view-model (table, statistics,
//! markers) from the static dataset. Failures are reported in the view's
//! `status`, always with `200`.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;
use wbd_core::{DiseaseKey, StateId};
use wbd_view::{DashboardController, DashboardView, DatasetSource, SelectionState};

use crate::state::AppState;

/// Selection for `GET /v1/dashboard`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// State id. Defaults to the first state in the dataset.
    pub state: Option<String>,
    /// Disease key. Defaults to the first disease in the dataset.
    pub disease: Option<String>,
    /// Case-insensitive district filter for the table.
    pub search: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/dashboard", get(get_dashboard))
}

/// GET /v1/dashboard — Derived dashboard view from the dataset.
#[utoipa::path(
    get,
    path = "/v1/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard view; `status` is Ready, NotFound or Unavailable"),
    ),
    tag = "dashboard"
)]
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardView> {
    let selection = resolve_selection(&state, query);
    let mut controller = DashboardController::new(
        DatasetSource::new(state.repository.clone()),
        state.gazetteer.clone(),
        selection,
    );
    controller.refresh().await;
    Json(controller.view())
}

fn resolve_selection(state: &AppState, query: DashboardQuery) -> SelectionState {
    let dataset = state.repository.get_all();
    let state_id = query
        .state
        .filter(|s| !s.is_empty())
        .map(StateId::new)
        .or_else(|| dataset.states.first().map(|s| s.id.clone()))
        .unwrap_or_else(|| StateId::new(""));
    let disease = query
        .disease
        .filter(|d| !d.is_empty())
        .map(DiseaseKey::new)
        .or_else(|| state.repository.default_disease().cloned())
        .unwrap_or_else(|| DiseaseKey::new(""));
    SelectionState {
        state: state_id,
        disease,
        search_term: query.search.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_state_and_disease() {
        let state = AppState::northeast().unwrap();
        let selection = resolve_selection(&state, DashboardQuery::default());
        assert_eq!(selection.state, StateId::new("assam"));
        assert_eq!(selection.disease, DiseaseKey::new("cholera"));
        assert_eq!(selection.search_term, "");
    }

    #[test]
    fn explicit_values_win() {
        let state = AppState::northeast().unwrap();
        let selection = resolve_selection(
            &state,
            DashboardQuery {
                state: Some("tripura".into()),
                disease: Some("typhoid".into()),
                search: Some("west".into()),
            },
        );
        assert_eq!(selection, SelectionState::new("tripura", "typhoid").with_search("west"));
    }
}
