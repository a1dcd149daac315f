// SPDX-License-Identifier: BUSL-1.1
//! # Map Data
//!
//! `GET /map-data` returns the map viewport and one marker per placeable
//! district. Without `state` every state is included; without `disease`
//! the dataset's first disease is used. An unknown state or disease yields
//! an empty marker list, not an error.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wbd_core::{CaseCount, Coordinates, DiseaseKey, StateId};
use wbd_dataset::StateEntry;
use wbd_view::{derive_markers, MapMarker, SourceRecord};

use crate::routes::diseases::DiseaseQuery;
use crate::state::AppState;

/// Map viewport plus markers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MapDataResponse {
    /// `[lat, lng]` of the initial viewport.
    #[schema(value_type = Vec<f64>)]
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<MapDataMarker>,
}

/// One district marker.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapDataMarker {
    /// 1-based position in the response.
    pub id: usize,
    /// `[lat, lng]`.
    #[schema(value_type = Vec<f64>)]
    pub position: Coordinates,
    pub district: String,
    #[schema(value_type = f64)]
    pub cases: CaseCount,
    /// `low`, `medium` or `high`.
    pub risk_level: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/map-data", get(get_map_data))
}

/// GET /map-data — Map viewport and classified district markers.
#[utoipa::path(
    get,
    path = "/map-data",
    params(DiseaseQuery),
    responses(
        (status = 200, description = "Viewport and markers", body = MapDataResponse),
    ),
    tag = "dataset"
)]
async fn get_map_data(
    State(state): State<AppState>,
    Query(query): Query<DiseaseQuery>,
) -> Json<MapDataResponse> {
    let markers = collect_markers(&state, &query);
    Json(MapDataResponse {
        center: state.gazetteer.center(),
        zoom: state.gazetteer.zoom(),
        markers: markers
            .into_iter()
            .enumerate()
            .map(|(i, m)| MapDataMarker {
                id: i + 1,
                position: m.position,
                district: m.district,
                cases: m.cases,
                risk_level: m.risk_level.as_lowercase().to_string(),
            })
            .collect(),
    })
}

fn collect_markers(state: &AppState, query: &DiseaseQuery) -> Vec<MapMarker> {
    let repo = &state.repository;
    let disease = match query.disease.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => DiseaseKey::new(d),
        None => match repo.default_disease() {
            Some(d) => d.clone(),
            None => return Vec::new(),
        },
    };
    if !repo.get_all().has_disease(&disease) {
        return Vec::new();
    }

    let states: Vec<&StateEntry> = match query.state.as_deref().filter(|s| !s.is_empty()) {
        Some(id) => repo.get_by_state(&StateId::new(id)).into_iter().collect(),
        None => repo.get_all().states.iter().collect(),
    };

    states
        .into_iter()
        .flat_map(|entry| {
            let records: Vec<SourceRecord> = entry
                .districts
                .iter()
                .map(|d| SourceRecord::new(d.name.clone(), d.cases(&disease)))
                .collect();
            derive_markers(&entry.id, &records, &state.gazetteer)
        })
        .collect()
}
