// SPDX-License-Identifier: BUSL-1.1
//! Predictor client error types.

use wbd_core::DashboardError;

/// Errors from predictor calls.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    /// Request rejected before it was sent.
    #[error("invalid forecast request: {0}")]
    InvalidRequest(String),

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Predictor returned a non-2xx status.
    #[error("predictor {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body carried an `error` field.
    #[error("predictor {endpoint} reported: {message}")]
    Upstream { endpoint: String, message: String },

    /// Response was not JSON or lacked expected fields.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl From<ForecastError> for DashboardError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::Malformed { .. } => DashboardError::MalformedResponse(err.to_string()),
            other => DashboardError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_maps_to_malformed_response() {
        let err = ForecastError::Malformed {
            endpoint: "/predict_state".into(),
            reason: "missing predictions".into(),
        };
        assert!(matches!(
            DashboardError::from(err),
            DashboardError::MalformedResponse(_)
        ));
    }

    #[test]
    fn everything_else_maps_to_transport() {
        let upstream = ForecastError::Upstream {
            endpoint: "/predict_state".into(),
            message: "model not loaded".into(),
        };
        let status = ForecastError::ApiError {
            endpoint: "/predict_state".into(),
            status: 500,
            body: String::new(),
        };
        let invalid = ForecastError::InvalidRequest("empty state".into());
        for err in [upstream, status, invalid] {
            assert!(matches!(DashboardError::from(err), DashboardError::Transport(_)));
        }
    }

    #[test]
    fn upstream_message_is_preserved() {
        let err = ForecastError::Upstream {
            endpoint: "/total_cases_by_state".into(),
            message: "unknown state".into(),
        };
        assert!(DashboardError::from(err).to_string().contains("unknown state"));
    }
}
