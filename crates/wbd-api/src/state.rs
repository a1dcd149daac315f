// SPDX-License-Identifier: BUSL-1.1
//! # Application State and Configuration
//!
//! Configuration is read from the environment once at startup:
//!
//! | Variable                    | Default    | Effect                                   |
//! |-----------------------------|------------|------------------------------------------|
//! | `WBD_PORT`                  | `8080`     | listen port                              |
//! | `FORECAST_API_URL`          | unset      | predictor base URL; unset disables it    |
//! | `WBD_FORECAST_TIMEOUT_SECS` | `30`       | bound on each forecast request           |
//! | `WBD_DATASET_PATH`          | built-in   | YAML or JSON dataset file                |
//! | `WBD_METRICS_ENABLED`       | `true`     | `/metrics` and request metrics           |
//! | `WBD_LOG_FORMAT`            | `text`     | `text` or `json` log lines               |
//!
//! A missing or invalid predictor URL never prevents startup; forecast
//! requests then report `Unavailable`. A dataset file that cannot be
//! loaded does.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use wbd_dataset::{DatasetError, DatasetRepository, DiseaseDataset, Gazetteer};
use wbd_forecast_client::{ForecastClient, ForecastConfig, FORECAST_URL_ENV};

pub const PORT_ENV: &str = "WBD_PORT";
pub const FORECAST_TIMEOUT_ENV: &str = "WBD_FORECAST_TIMEOUT_SECS";
pub const DATASET_PATH_ENV: &str = "WBD_DATASET_PATH";
pub const METRICS_ENABLED_ENV: &str = "WBD_METRICS_ENABLED";
pub const LOG_FORMAT_ENV: &str = "WBD_LOG_FORMAT";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FORECAST_TIMEOUT_SECS: u64 = 30;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub forecast_url: Option<String>,
    pub forecast_timeout: Duration,
    pub dataset_path: Option<PathBuf>,
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            forecast_url: None,
            forecast_timeout: Duration::from_secs(DEFAULT_FORECAST_TIMEOUT_SECS),
            dataset_path: None,
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = non_empty(PORT_ENV)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.port);
        let forecast_timeout = non_empty(FORECAST_TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.forecast_timeout);
        let metrics_enabled = non_empty(METRICS_ENABLED_ENV)
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(defaults.metrics_enabled);

        Self {
            port,
            forecast_url: non_empty(FORECAST_URL_ENV),
            forecast_timeout,
            dataset_path: non_empty(DATASET_PATH_ENV).map(PathBuf::from),
            metrics_enabled,
            log_format: non_empty(LOG_FORMAT_ENV)
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }
}

/// Shared application state, cheaply cloneable.
#[derive(Debug, Clone)]
pub struct AppState {
    pub repository: DatasetRepository,
    pub gazetteer: Arc<Gazetteer>,
    pub forecast: Option<Arc<ForecastClient>>,
    pub config: AppConfig,
}

impl AppState {
    /// Built-in dataset and gazetteer, no predictor, default configuration.
    pub fn northeast() -> Result<Self, DatasetError> {
        Ok(Self::with_parts(
            DatasetRepository::northeast()?,
            Gazetteer::northeast()?,
            None,
            AppConfig::default(),
        ))
    }

    pub fn with_parts(
        repository: DatasetRepository,
        gazetteer: Gazetteer,
        forecast: Option<ForecastClient>,
        config: AppConfig,
    ) -> Self {
        Self {
            repository,
            gazetteer: Arc::new(gazetteer),
            forecast: forecast.map(Arc::new),
            config,
        }
    }

    /// Load the dataset and build the predictor client as configured.
    pub fn from_config(config: AppConfig) -> Result<Self, DatasetError> {
        let dataset = match &config.dataset_path {
            Some(path) => DiseaseDataset::from_path(path)?,
            None => DiseaseDataset::northeast()?,
        };
        let repository = DatasetRepository::new(dataset)?;
        let gazetteer = Gazetteer::northeast()?;
        let forecast = config.forecast_url.as_deref().and_then(build_forecast_client);
        if forecast.is_none() {
            tracing::info!("no predictor configured, forecast requests will report Unavailable");
        }
        Ok(Self::with_parts(repository, gazetteer, forecast, config))
    }
}

fn build_forecast_client(url: &str) -> Option<ForecastClient> {
    let client = ForecastConfig::new(url)
        .map_err(wbd_forecast_client::ForecastError::from)
        .and_then(ForecastClient::new);
    match client {
        Ok(client) => {
            tracing::info!(url = %client.config().base_url(), "predictor configured");
            Some(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring invalid predictor configuration");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("WBD_PORT", "9000"),
            ("FORECAST_API_URL", "http://predictor:5000"),
            ("WBD_FORECAST_TIMEOUT_SECS", "5"),
            ("WBD_DATASET_PATH", "/data/ne.yaml"),
            ("WBD_METRICS_ENABLED", "FALSE"),
            ("WBD_LOG_FORMAT", "json"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.forecast_url.as_deref(), Some("http://predictor:5000"));
        assert_eq!(config.forecast_timeout, Duration::from_secs(5));
        assert_eq!(config.dataset_path, Some(PathBuf::from("/data/ne.yaml")));
        assert!(!config.metrics_enabled);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("WBD_PORT", "eighty"),
            ("WBD_FORECAST_TIMEOUT_SECS", "0"),
            ("FORECAST_API_URL", "  "),
            ("WBD_LOG_FORMAT", "xml"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.forecast_timeout, Duration::from_secs(30));
        assert_eq!(config.forecast_url, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn invalid_predictor_url_does_not_fail_startup() {
        let config = AppConfig {
            forecast_url: Some("not a url".into()),
            ..AppConfig::default()
        };
        let state = AppState::from_config(config).unwrap();
        assert!(state.forecast.is_none());
    }

    #[test]
    fn dataset_file_replaces_built_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ne.yaml");
        std::fs::write(
            &path,
            r#"
states:
  - id: assam
    name: Assam
    districts:
      - { name: Kamrup, cholera: 45 }
diseases: [cholera]
diseaseNames: { cholera: Cholera }
"#,
        )
        .unwrap();
        let config = AppConfig {
            dataset_path: Some(path),
            ..AppConfig::default()
        };
        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.repository.state_count(), 1);
        assert_eq!(state.repository.district_count(), 1);
    }

    #[test]
    fn missing_dataset_file_fails_startup() {
        let config = AppConfig {
            dataset_path: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..AppConfig::default()
        };
        assert!(matches!(
            AppState::from_config(config),
            Err(DatasetError::Io { .. })
        ));
    }
}
