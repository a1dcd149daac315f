// SPDX-License-Identifier: BUSL-1.1
//! # Data Sources
//!
//! A [`DataSource`] turns a [`SelectionState`] into a [`Snapshot`]: the
//! per-district records every derivation starts from.
//!
//! | Source             | Backed by                    | Records carry                 |
//! |--------------------|------------------------------|-------------------------------|
//! | [`DatasetSource`]  | [`DatasetRepository`]        | district + cases              |
//! | [`ForecastSource`] | a [`ForecastAdapter`] + date | cases, interval, coords, date |
//!
//! Both report failures in the shared [`DashboardError`] taxonomy.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use wbd_core::{CaseCount, Coordinates, DashboardError, StateId};
use wbd_dataset::{DatasetRepository, DistrictCases};
use wbd_forecast_client::{ForecastAdapter, PredictionRecord};

use crate::selection::SelectionState;

/// One district's raw input to the derivations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub district: String,
    pub cases: CaseCount,
    pub confidence_lower: Option<f64>,
    pub confidence_upper: Option<f64>,
    pub coordinates: Option<Coordinates>,
    pub date: Option<String>,
}

impl SourceRecord {
    /// A record with only a district and a count.
    pub fn new(district: impl Into<String>, cases: CaseCount) -> Self {
        Self {
            district: district.into(),
            cases,
            confidence_lower: None,
            confidence_upper: None,
            coordinates: None,
            date: None,
        }
    }
}

impl From<DistrictCases> for SourceRecord {
    fn from(d: DistrictCases) -> Self {
        Self::new(d.district, d.cases)
    }
}

impl From<PredictionRecord> for SourceRecord {
    fn from(p: PredictionRecord) -> Self {
        Self {
            district: p.district,
            cases: p.cases,
            confidence_lower: Some(p.confidence_lower),
            confidence_upper: Some(p.confidence_upper),
            coordinates: p.coordinates,
            date: Some(p.date),
        }
    }
}

/// Records fetched for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Dataset id of the state, used for gazetteer lookups.
    pub state: StateId,
    pub records: Vec<SourceRecord>,
    /// Total computed by the source itself; replaces the local sum.
    pub delegated_total: Option<CaseCount>,
}

impl Snapshot {
    pub fn new(state: StateId, records: Vec<SourceRecord>) -> Self {
        Self {
            state,
            records,
            delegated_total: None,
        }
    }
}

/// Something that can fetch the records for a selection.
pub trait DataSource: Send + Sync {
    fn fetch(
        &self,
        selection: &SelectionState,
    ) -> impl Future<Output = Result<Snapshot, DashboardError>> + Send;
}

/// Reads from the static dataset.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    repository: DatasetRepository,
}

impl DatasetSource {
    pub fn new(repository: DatasetRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &DatasetRepository {
        &self.repository
    }

    /// Synchronous form of [`DataSource::fetch`]; the dataset never blocks.
    pub fn snapshot(&self, selection: &SelectionState) -> Result<Snapshot, DashboardError> {
        let view = self
            .repository
            .get_by_state_and_disease(&selection.state, &selection.disease)?;
        Ok(Snapshot::new(
            selection.state.clone(),
            view.data.into_iter().map(SourceRecord::from).collect(),
        ))
    }
}

impl DataSource for DatasetSource {
    async fn fetch(&self, selection: &SelectionState) -> Result<Snapshot, DashboardError> {
        self.snapshot(selection)
    }
}

/// Reads per-district forecasts from the predictor for a fixed date.
///
/// The selection's disease key is sent as the predictor target. State ids
/// are translated to the display names the predictor expects.
#[derive(Debug)]
pub struct ForecastSource<A> {
    adapter: Arc<A>,
    repository: DatasetRepository,
    date: String,
    delegate_total: bool,
}

impl<A> Clone for ForecastSource<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            repository: self.repository.clone(),
            date: self.date.clone(),
            delegate_total: self.delegate_total,
        }
    }
}

impl<A: ForecastAdapter> ForecastSource<A> {
    pub fn new(adapter: Arc<A>, repository: DatasetRepository, date: impl Into<String>) -> Self {
        Self {
            adapter,
            repository,
            date: date.into(),
            delegate_total: false,
        }
    }

    /// Also ask the predictor for the state total.
    pub fn with_delegated_total(mut self, enabled: bool) -> Self {
        self.delegate_total = enabled;
        self
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Display name for the predictor, and the dataset id for the gazetteer.
    ///
    /// States unknown to the dataset are passed through as given.
    fn predictor_state(&self, state: &StateId) -> (String, StateId) {
        match self.repository.resolve_state(state.as_str()) {
            Some(entry) => (entry.name.clone(), entry.id.clone()),
            None => (
                state.as_str().to_string(),
                StateId::from_display_name(state.as_str()),
            ),
        }
    }
}

impl<A: ForecastAdapter> DataSource for ForecastSource<A> {
    async fn fetch(&self, selection: &SelectionState) -> Result<Snapshot, DashboardError> {
        let (state_name, state_id) = self.predictor_state(&selection.state);
        let target = selection.disease.as_str();

        let predictions = self
            .adapter
            .predict(&state_name, target, &self.date)
            .await?;

        let mut snapshot = Snapshot::new(
            state_id,
            predictions.into_iter().map(SourceRecord::from).collect(),
        );

        if self.delegate_total {
            match self.adapter.total_cases(&state_name, target).await {
                Ok(total) => snapshot.delegated_total = Some(CaseCount::new(total)),
                Err(e) => {
                    tracing::warn!(
                        state = %state_name,
                        forecast_target = target,
                        error = %e,
                        "delegated total unavailable, using local sum"
                    );
                }
            }
        }

        Ok(snapshot)
    }
}
