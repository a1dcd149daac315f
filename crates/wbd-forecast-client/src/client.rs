// SPDX-License-Identifier: BUSL-1.1
//! # Predictor HTTP Client
//!
//! One outbound request per call. No retry, no cache and no timeout.
//! Callers that need bounded latency wrap the returned future (the API
//! layer uses `tokio::time::timeout`).

use std::future::Future;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::types::{
    error_message, PredictStateRequest, PredictStateResponse, PredictionRecord,
    TotalCasesRequest, TotalCasesResponse,
};

const PREDICT_STATE_PATH: &str = "predict_state";
const TOTAL_CASES_PATH: &str = "total_cases_by_state";

/// Request/response boundary to an external predictor.
///
/// Implementations hold no state between calls.
pub trait ForecastAdapter: Send + Sync {
    /// Per-district forecasts for `state` and `target` on `date` (`YYYY-MM-DD`).
    fn predict(
        &self,
        state: &str,
        target: &str,
        date: &str,
    ) -> impl Future<Output = Result<Vec<PredictionRecord>, ForecastError>> + Send;

    /// Total forecast cases for `state` and `disease`, computed upstream.
    fn total_cases(
        &self,
        state: &str,
        disease: &str,
    ) -> impl Future<Output = Result<f64, ForecastError>> + Send;
}

/// `reqwest`-backed predictor client.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: reqwest::Client,
    config: ForecastConfig,
}

impl ForecastClient {
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastError> {
        let http = reqwest::Client::builder()
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(ForecastError::ClientBuild)?;
        Ok(Self { http, config })
    }

    /// Build from `FORECAST_API_URL`.
    pub fn from_env() -> Result<Self, ForecastError> {
        Self::new(ForecastConfig::from_env()?)
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// POST a JSON body and decode the JSON response.
    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ForecastError> {
        let endpoint = self.config.endpoint(path);
        tracing::debug!(%endpoint, "calling predictor");

        let resp = self
            .http
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(|source| ForecastError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| ForecastError::Http {
            endpoint: endpoint.clone(),
            source,
        })?;

        if !status.is_success() {
            // Predictors report domain errors as `{"error": ...}` even on 4xx/5xx.
            if let Some(message) = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("error").map(error_message))
            {
                return Err(ForecastError::Upstream { endpoint, message });
            }
            return Err(ForecastError::ApiError {
                endpoint,
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ForecastError::Malformed {
            endpoint,
            reason: e.to_string(),
        })
    }
}

fn validate_request(state: &str, target: &str, date: &str) -> Result<(), ForecastError> {
    if state.trim().is_empty() {
        return Err(ForecastError::InvalidRequest("state must not be empty".into()));
    }
    if target.trim().is_empty() {
        return Err(ForecastError::InvalidRequest("target must not be empty".into()));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
        ForecastError::InvalidRequest(format!("date {date:?} is not YYYY-MM-DD: {e}"))
    })?;
    Ok(())
}

impl ForecastAdapter for ForecastClient {
    async fn predict(
        &self,
        state: &str,
        target: &str,
        date: &str,
    ) -> Result<Vec<PredictionRecord>, ForecastError> {
        validate_request(state, target, date)?;
        let body = PredictStateRequest {
            state: state.to_string(),
            target: target.to_string(),
            date: date.to_string(),
        };
        let resp: PredictStateResponse = self.post_json(PREDICT_STATE_PATH, &body).await?;
        let endpoint = self.config.endpoint(PREDICT_STATE_PATH);

        if let Some(err) = resp.error.as_ref().filter(|e| !e.is_null()) {
            let message = error_message(err);
            tracing::warn!(state, forecast_target = target, %message, "predictor reported an error");
            return Err(ForecastError::Upstream { endpoint, message });
        }

        let wire = resp.predictions.ok_or_else(|| ForecastError::Malformed {
            endpoint: endpoint.clone(),
            reason: "response has neither `predictions` nor `error`".into(),
        })?;

        let total = wire.len();
        let records: Vec<PredictionRecord> = wire
            .into_iter()
            .filter_map(|w| w.into_record(date))
            .collect();
        if records.len() != total {
            return Err(ForecastError::Malformed {
                endpoint,
                reason: format!(
                    "{} of {total} predictions have no district",
                    total - records.len()
                ),
            });
        }

        tracing::debug!(state, forecast_target = target, date, count = records.len(), "received predictions");
        Ok(records)
    }

    async fn total_cases(&self, state: &str, disease: &str) -> Result<f64, ForecastError> {
        if state.trim().is_empty() || disease.trim().is_empty() {
            return Err(ForecastError::InvalidRequest(
                "state and disease must not be empty".into(),
            ));
        }
        let body = TotalCasesRequest {
            state: state.to_string(),
            disease: disease.to_string(),
        };
        let resp: TotalCasesResponse = self.post_json(TOTAL_CASES_PATH, &body).await?;
        let endpoint = self.config.endpoint(TOTAL_CASES_PATH);

        if let Some(total) = resp.total_cases.as_ref().filter(|v| !v.is_null()) {
            let parsed = match total {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            return parsed
                .map(wbd_core::coerce_cases)
                .ok_or_else(|| ForecastError::Malformed {
                    endpoint,
                    reason: format!("total_cases is not numeric: {total}"),
                });
        }

        match resp.error.as_ref() {
            Some(err) => Err(ForecastError::Upstream {
                endpoint,
                message: error_message(err),
            }),
            None => Err(ForecastError::Malformed {
                endpoint,
                reason: "response has neither `total_cases` nor `error`".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validation() {
        assert!(validate_request("Meghalaya", "diarrhea_cases", "2023-12-12").is_ok());
        assert!(matches!(
            validate_request("", "diarrhea_cases", "2023-12-12"),
            Err(ForecastError::InvalidRequest(_))
        ));
        assert!(matches!(
            validate_request("Meghalaya", " ", "2023-12-12"),
            Err(ForecastError::InvalidRequest(_))
        ));
        assert!(matches!(
            validate_request("Meghalaya", "diarrhea_cases", "12/12/2023"),
            Err(ForecastError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn invalid_request_sends_nothing() {
        // Port 1 is never listening; reaching the network would be an Http error.
        let client = ForecastClient::new(ForecastConfig::new("http://127.0.0.1:1").unwrap()).unwrap();
        let err = client.predict("Assam", "diarrhea_cases", "yesterday").await.unwrap_err();
        assert!(matches!(err, ForecastError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn unreachable_predictor_is_http_error() {
        let client = ForecastClient::new(ForecastConfig::new("http://127.0.0.1:1").unwrap()).unwrap();
        let err = client
            .predict("Assam", "diarrhea_cases", "2023-12-12")
            .await
            .unwrap_err();
        assert!(matches!(err, ForecastError::Http { .. }), "got: {err:?}");
    }
}
