// SPDX-License-Identifier: BUSL-1.1
//! Predictor endpoint configuration.
//!
//! A single base URL selects the predictor host. It is read from
//! `FORECAST_API_URL`; when the variable is absent the caller runs without
//! forecasts rather than failing to start.

use url::Url;

/// Environment variable holding the predictor base URL.
pub const FORECAST_URL_ENV: &str = "FORECAST_API_URL";

/// Errors building a [`ForecastConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid predictor base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Where the predictor lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastConfig {
    base_url: Url,
}

impl ForecastConfig {
    /// Parse a base URL. Only `http` and `https` are accepted.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }
        Ok(Self { base_url: url })
    }

    /// Read `FORECAST_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(FORECAST_URL_ENV) {
            Ok(v) if !v.trim().is_empty() => Self::new(&v),
            _ => Err(ConfigError::Missing(FORECAST_URL_ENV)),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of an endpoint below the base, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let c = ForecastConfig::new("http://predictor.local:5000/").unwrap();
        assert_eq!(c.endpoint("/predict_state"), "http://predictor.local:5000/predict_state");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let c = ForecastConfig::new("https://example.org/api/v2").unwrap();
        assert_eq!(
            c.endpoint("total_cases_by_state"),
            "https://example.org/api/v2/total_cases_by_state"
        );
    }

    #[test]
    fn rejects_garbage_and_other_schemes() {
        assert!(matches!(
            ForecastConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ForecastConfig::new("ftp://example.org"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
