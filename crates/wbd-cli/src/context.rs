// SPDX-License-Identifier: BUSL-1.1
//! Global options shared by every subcommand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use wbd_dataset::{DatasetRepository, DiseaseDataset, Gazetteer};
use wbd_forecast_client::{ForecastClient, ForecastConfig, FORECAST_URL_ENV};

/// Dataset and predictor locations resolved from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    /// YAML or JSON dataset file; `None` uses the built-in dataset.
    pub dataset: Option<PathBuf>,
    /// Predictor base URL.
    pub forecast_url: Option<String>,
}

impl CliContext {
    pub fn load_dataset(&self) -> Result<DiseaseDataset> {
        match &self.dataset {
            Some(path) => DiseaseDataset::from_path(path)
                .with_context(|| format!("loading dataset {}", path.display())),
            None => DiseaseDataset::northeast().context("loading built-in dataset"),
        }
    }

    pub fn repository(&self) -> Result<DatasetRepository> {
        let dataset = self.load_dataset()?;
        tracing::debug!(
            states = dataset.states.len(),
            districts = dataset.district_count(),
            "dataset loaded"
        );
        Ok(DatasetRepository::new(dataset)?)
    }

    pub fn gazetteer(&self) -> Result<Gazetteer> {
        Gazetteer::northeast().context("loading built-in gazetteer")
    }

    /// Predictor client; an error when no URL was given.
    pub fn forecast_client(&self) -> Result<ForecastClient> {
        let url = self
            .forecast_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .with_context(|| {
                format!("no predictor configured: pass --forecast-url or set {FORECAST_URL_ENV}")
            })?;
        let config =
            ForecastConfig::new(url).with_context(|| format!("invalid predictor URL {url:?}"))?;
        Ok(ForecastClient::new(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_uses_built_in_dataset() {
        let repo = CliContext::default().repository().unwrap();
        assert_eq!(repo.state_count(), 8);
    }

    #[test]
    fn missing_dataset_file_is_an_error() {
        let ctx = CliContext {
            dataset: Some(PathBuf::from("/nonexistent/dataset.yaml")),
            ..CliContext::default()
        };
        let err = ctx.repository().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/dataset.yaml"));
    }

    #[test]
    fn forecast_client_requires_url() {
        let err = CliContext::default().forecast_client().unwrap_err();
        assert!(err.to_string().contains("--forecast-url"));

        let ctx = CliContext {
            forecast_url: Some("http://localhost:5000".into()),
            ..CliContext::default()
        };
        assert!(ctx.forecast_client().is_ok());
    }
}
