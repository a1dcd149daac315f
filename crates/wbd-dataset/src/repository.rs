// SPDX-License-Identifier: BUSL-1.1
//! # Dataset Repository
//!
//! Structural queries over an injected, immutable [`DiseaseDataset`].
//!
//! | Query                       | Result                                  |
//! |-----------------------------|-----------------------------------------|
//! | [`get_all`]                 | the whole dataset                       |
//! | [`get_by_state`]            | one state with all disease columns      |
//! | [`get_by_disease`]          | one disease across every state          |
//! | [`get_by_state_and_disease`]| one disease in one state                |
//!
//! Lookups match ids and keys exactly. Unknown ids and keys are reported as
//! [`DatasetError::StateNotFound`] / [`DatasetError::DiseaseNotFound`];
//! a district missing a count is a zero, never a not-found.
//!
//! [`get_all`]: DatasetRepository::get_all
//! [`get_by_state`]: DatasetRepository::get_by_state
//! [`get_by_disease`]: DatasetRepository::get_by_disease
//! [`get_by_state_and_disease`]: DatasetRepository::get_by_state_and_disease

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wbd_core::{CaseCount, DiseaseKey, StateId};

use crate::dataset::{DiseaseDataset, StateEntry};
use crate::error::DatasetError;

/// A `(district, cases)` pair for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictCases {
    pub district: String,
    pub cases: CaseCount,
}

/// One state's districts for a single disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDistricts {
    /// State display name.
    #[serde(rename = "state")]
    pub state_name: String,
    pub state_id: StateId,
    pub districts: Vec<DistrictCases>,
}

/// One disease across every state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseView {
    /// Disease display name.
    #[serde(rename = "disease")]
    pub disease_name: String,
    pub data: Vec<StateDistricts>,
}

/// One disease in one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDiseaseView {
    #[serde(rename = "state")]
    pub state_name: String,
    #[serde(rename = "disease")]
    pub disease_name: String,
    pub data: Vec<DistrictCases>,
}

/// Read-only access to the disease dataset.
///
/// Cheaply cloneable; all clones share the same dataset.
#[derive(Debug, Clone)]
pub struct DatasetRepository {
    dataset: Arc<DiseaseDataset>,
}

impl DatasetRepository {
    /// Wrap a dataset after validating it.
    pub fn new(dataset: DiseaseDataset) -> Result<Self, DatasetError> {
        dataset.validate()?;
        Ok(Self {
            dataset: Arc::new(dataset),
        })
    }

    /// Repository over the built-in Northeast India dataset.
    pub fn northeast() -> Result<Self, DatasetError> {
        Self::new(DiseaseDataset::northeast()?)
    }

    pub fn get_all(&self) -> &DiseaseDataset {
        &self.dataset
    }

    pub fn get_by_state(&self, state_id: &StateId) -> Result<&StateEntry, DatasetError> {
        self.dataset
            .states
            .iter()
            .find(|s| &s.id == state_id)
            .ok_or_else(|| DatasetError::StateNotFound(state_id.clone()))
    }

    pub fn get_by_disease(&self, disease: &DiseaseKey) -> Result<DiseaseView, DatasetError> {
        let disease_name = self.disease_name(disease)?.to_string();
        let data = self
            .dataset
            .states
            .iter()
            .map(|state| StateDistricts {
                state_name: state.name.clone(),
                state_id: state.id.clone(),
                districts: district_cases(state, disease),
            })
            .collect();
        Ok(DiseaseView { disease_name, data })
    }

    /// State is checked before disease, so an unknown pair reports the state.
    pub fn get_by_state_and_disease(
        &self,
        state_id: &StateId,
        disease: &DiseaseKey,
    ) -> Result<StateDiseaseView, DatasetError> {
        let state = self.get_by_state(state_id)?;
        let disease_name = self.disease_name(disease)?.to_string();
        Ok(StateDiseaseView {
            state_name: state.name.clone(),
            disease_name,
            data: district_cases(state, disease),
        })
    }

    /// Display name of a listed disease.
    pub fn disease_name(&self, disease: &DiseaseKey) -> Result<&str, DatasetError> {
        if !self.dataset.has_disease(disease) {
            return Err(DatasetError::DiseaseNotFound(disease.clone()));
        }
        self.dataset
            .disease_names
            .get(disease)
            .map(String::as_str)
            .ok_or_else(|| DatasetError::DiseaseNotFound(disease.clone()))
    }

    /// Find a state by exact id, or by display name ignoring case.
    ///
    /// The external predictor identifies states by display name
    /// (`"Arunachal Pradesh"`) while the dataset uses ids
    /// (`"arunachal-pradesh"`).
    pub fn resolve_state(&self, id_or_name: &str) -> Option<&StateEntry> {
        let states = &self.dataset.states;
        states
            .iter()
            .find(|s| s.id.as_str() == id_or_name)
            .or_else(|| {
                states
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(id_or_name.trim()))
            })
    }

    /// The first listed disease, used as the default selection.
    pub fn default_disease(&self) -> Option<&DiseaseKey> {
        self.dataset.diseases.first()
    }

    pub fn state_count(&self) -> usize {
        self.dataset.states.len()
    }

    pub fn district_count(&self) -> usize {
        self.dataset.district_count()
    }

    pub fn disease_count(&self) -> usize {
        self.dataset.diseases.len()
    }
}

fn district_cases(state: &StateEntry, disease: &DiseaseKey) -> Vec<DistrictCases> {
    state
        .districts
        .iter()
        .map(|d| DistrictCases {
            district: d.name.clone(),
            cases: d.cases(disease),
        })
        .collect()
}
