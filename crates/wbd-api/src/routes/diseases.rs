// SPDX-License-Identifier: BUSL-1.1
//! # Dataset Queries
//!
//! `GET /diseases` returns one of four shapes depending on which query
//! parameters are present:
//!
//! | `state` | `disease` | Body                                              |
//! |---------|-----------|---------------------------------------------------|
//! | –       | –         | the whole dataset                                 |
//! | ✓       | –         | one state with every disease column               |
//! | –       | ✓         | `{disease, data: [{state, stateId, districts}]}`  |
//! | ✓       | ✓         | `{state, disease, data: [{district, cases}]}`     |
//!
//! Unknown states and diseases are 404.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;
use wbd_core::{DiseaseKey, StateId};

use crate::error::AppError;
use crate::state::AppState;

/// Optional filters for `GET /diseases`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DiseaseQuery {
    /// State id, e.g. `assam`.
    pub state: Option<String>,
    /// Disease key, e.g. `cholera`.
    pub disease: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/diseases", get(get_diseases))
}

/// GET /diseases — Query the disease dataset.
#[utoipa::path(
    get,
    path = "/diseases",
    params(DiseaseQuery),
    responses(
        (status = 200, description = "Dataset, state entry, disease view, or state+disease view"),
        (status = 404, description = "Unknown state or disease", body = crate::error::ErrorBody),
    ),
    tag = "dataset"
)]
async fn get_diseases(
    State(state): State<AppState>,
    Query(query): Query<DiseaseQuery>,
) -> Result<Response, AppError> {
    let repo = &state.repository;
    let state_id = query.state.filter(|s| !s.is_empty()).map(StateId::new);
    let disease = query.disease.filter(|d| !d.is_empty()).map(DiseaseKey::new);

    let response = match (state_id, disease) {
        (Some(state_id), Some(disease)) => {
            Json(repo.get_by_state_and_disease(&state_id, &disease)?).into_response()
        }
        (Some(state_id), None) => Json(repo.get_by_state(&state_id)?).into_response(),
        (None, Some(disease)) => Json(repo.get_by_disease(&disease)?).into_response(),
        (None, None) => Json(repo.get_all()).into_response(),
    };
    Ok(response)
}
