// SPDX-License-Identifier: BUSL-1.1
//! # Predictor Wire Types
//!
//! Request bodies are sent as-is. Responses are read leniently and then
//! mapped to [`PredictionRecord`]:
//!
//! | Wire field      | Record field       | When absent / invalid      |
//! |-----------------|--------------------|----------------------------|
//! | `district`      | `district`         | whole response malformed   |
//! | `cases`         | `cases`            | `0`                        |
//! | `mean_ci_lower` | `confidence_lower` | `cases`                    |
//! | `mean_ci_upper` | `confidence_upper` | `cases`                    |
//! | `coords`        | `coordinates`      | `None` (gazetteer decides) |
//! | `date`          | `date`             | the requested date         |

use serde::{Deserialize, Serialize};
use wbd_core::{CaseCount, Coordinates};

/// Body of `POST /predict_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictStateRequest {
    pub state: String,
    pub target: String,
    pub date: String,
}

/// Body of `POST /total_cases_by_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCasesRequest {
    pub state: String,
    pub disease: String,
}

/// Forecast for one district on one date.
///
/// `confidence_lower <= cases <= confidence_upper` is expected but not
/// enforced; records violating it are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub district: String,
    pub cases: CaseCount,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub coordinates: Option<Coordinates>,
    pub date: String,
}

impl PredictionRecord {
    pub fn interval_contains_cases(&self) -> bool {
        let c = self.cases.value();
        self.confidence_lower <= c && c <= self.confidence_upper
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictStateResponse {
    #[serde(default)]
    pub predictions: Option<Vec<WirePrediction>>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePrediction {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub cases: CaseCount,
    #[serde(default)]
    pub mean_ci_lower: Option<f64>,
    #[serde(default)]
    pub mean_ci_upper: Option<f64>,
    #[serde(default)]
    pub coords: Option<serde_json::Value>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TotalCasesResponse {
    #[serde(default)]
    pub total_cases: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Render an `error` field, which predictors send as a string or an object.
pub(crate) fn error_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read `coords` as `[lat, lng]`; anything else is treated as absent.
pub(crate) fn parse_coords(value: Option<&serde_json::Value>) -> Option<Coordinates> {
    let pair = value?.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let coords = Coordinates::new(pair[0].as_f64()?, pair[1].as_f64()?);
    coords.is_valid().then_some(coords)
}

impl WirePrediction {
    /// `None` when the record has no district name.
    pub(crate) fn into_record(self, requested_date: &str) -> Option<PredictionRecord> {
        let district = self.district.filter(|d| !d.trim().is_empty())?;
        let cases = self.cases;
        Some(PredictionRecord {
            district,
            cases,
            confidence_lower: self.mean_ci_lower.unwrap_or(cases.value()),
            confidence_upper: self.mean_ci_upper.unwrap_or(cases.value()),
            coordinates: parse_coords(self.coords.as_ref()),
            date: self.date.unwrap_or_else(|| requested_date.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: serde_json::Value) -> WirePrediction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn full_record_maps_every_field() {
        let record = wire(json!({
            "district": "East Khasi Hills",
            "cases": 41.7,
            "mean_ci_lower": 30.2,
            "mean_ci_upper": 55.9,
            "coords": [25.5788, 91.8933],
            "date": "2023-12-12"
        }))
        .into_record("2024-01-01")
        .unwrap();
        assert_eq!(record.district, "East Khasi Hills");
        assert_eq!(record.cases.value(), 41.7);
        assert_eq!(record.confidence_lower, 30.2);
        assert_eq!(record.confidence_upper, 55.9);
        assert_eq!(record.coordinates, Some(Coordinates::new(25.5788, 91.8933)));
        assert_eq!(record.date, "2023-12-12");
        assert!(record.interval_contains_cases());
    }

    #[test]
    fn sparse_record_gets_defaults() {
        let record = wire(json!({"district": "Ri Bhoi"}))
            .into_record("2023-12-12")
            .unwrap();
        assert_eq!(record.cases, CaseCount::ZERO);
        assert_eq!(record.confidence_lower, 0.0);
        assert_eq!(record.confidence_upper, 0.0);
        assert_eq!(record.coordinates, None);
        assert_eq!(record.date, "2023-12-12");
    }

    #[test]
    fn missing_district_is_rejected() {
        assert!(wire(json!({"cases": 3})).into_record("2023-12-12").is_none());
        assert!(wire(json!({"district": "  "})).into_record("2023-12-12").is_none());
    }

    #[test]
    fn inverted_interval_is_kept_as_given() {
        let record = wire(json!({
            "district": "Aizawl", "cases": 50, "mean_ci_lower": 60, "mean_ci_upper": 40
        }))
        .into_record("2023-12-12")
        .unwrap();
        assert_eq!(record.confidence_lower, 60.0);
        assert_eq!(record.confidence_upper, 40.0);
        assert!(!record.interval_contains_cases());
    }

    #[test]
    fn bad_coords_are_dropped() {
        assert_eq!(parse_coords(Some(&json!([1.0]))), None);
        assert_eq!(parse_coords(Some(&json!(["a", "b"]))), None);
        assert_eq!(parse_coords(Some(&json!([200.0, 10.0]))), None);
        assert_eq!(parse_coords(Some(&json!({"lat": 1, "lng": 2}))), None);
        assert_eq!(parse_coords(None), None);
    }

    #[test]
    fn error_field_rendering() {
        assert_eq!(error_message(&json!("bad state")), "bad state");
        assert_eq!(error_message(&json!({"code": 1})), "{\"code\":1}");
    }
}
