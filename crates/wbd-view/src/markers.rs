// SPDX-License-Identifier: BUSL-1.1
//! # Map Markers
//!
//! Position resolution order:
//!
//! 1. coordinates carried by the record, if valid;
//! 2. the gazetteer entry for `(state, district)`;
//! 3. otherwise the district is left off the map.
//!
//! A marker is never placed at a default position.

use serde::Serialize;
use wbd_core::{CaseCount, Coordinates, MarkerStyle, RiskLevel, StateId};
use wbd_dataset::Gazetteer;

use crate::source::SourceRecord;

/// A classified, positioned district marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub district: String,
    pub position: Coordinates,
    pub cases: CaseCount,
    pub risk_level: RiskLevel,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub style: MarkerStyle,
}

/// Markers for every record of `state` that can be placed.
pub fn derive_markers(
    state: &StateId,
    records: &[SourceRecord],
    gazetteer: &Gazetteer,
) -> Vec<MapMarker> {
    records
        .iter()
        .filter_map(|record| {
            let position = record
                .coordinates
                .filter(Coordinates::is_valid)
                .or_else(|| gazetteer.lookup(state.as_str(), &record.district));
            let Some(position) = position else {
                tracing::debug!(
                    state = %state,
                    district = %record.district,
                    "no coordinates for district, marker dropped"
                );
                return None;
            };
            let cases = record.cases;
            let risk_level = RiskLevel::classify(cases.value());
            Some(MapMarker {
                district: record.district.clone(),
                position,
                cases,
                risk_level,
                confidence_lower: record.confidence_lower.unwrap_or(cases.value()),
                confidence_upper: record.confidence_upper.unwrap_or(cases.value()),
                date: record.date.clone(),
                style: risk_level.marker_style(),
            })
        })
        .collect()
}
