// SPDX-License-Identifier: BUSL-1.1
//! # Disease Dataset
//!
//! The static reference data: states, their districts, and a case count per
//! district per disease. The serialized shape flattens counts into the
//! district object:
//!
//! ```yaml
//! states:
//!   - id: assam
//!     name: Assam
//!     districts:
//!       - { name: Kamrup, cholera: 45, typhoid: 23 }
//! diseases: [cholera, typhoid]
//! diseaseNames: { cholera: Cholera, typhoid: Typhoid }
//! ```
//!
//! A district without a column for some disease reads as zero for it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use wbd_core::{CaseCount, DiseaseKey, StateId};

use crate::error::DatasetError;

const NORTHEAST_YAML: &str = include_str!("../data/northeast.yaml");

/// The complete dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDataset {
    pub states: Vec<StateEntry>,
    pub diseases: Vec<DiseaseKey>,
    pub disease_names: BTreeMap<DiseaseKey, String>,
}

/// One state and its districts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: StateId,
    pub name: String,
    pub districts: Vec<DistrictRecord>,
}

/// One district and its per-disease counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictRecord {
    pub name: String,
    #[serde(flatten)]
    pub counts: BTreeMap<DiseaseKey, CaseCount>,
}

impl DistrictRecord {
    /// Count for `disease`, zero when the district has no such column.
    pub fn cases(&self, disease: &DiseaseKey) -> CaseCount {
        self.counts.get(disease).copied().unwrap_or(CaseCount::ZERO)
    }
}

impl DiseaseDataset {
    /// The built-in Northeast India dataset.
    pub fn northeast() -> Result<Self, DatasetError> {
        Self::from_yaml_str(NORTHEAST_YAML)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_yaml::from_str(yaml)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parse and validate a JSON document (the `GET /diseases` shape).
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load a dataset file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let dataset = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        tracing::info!(
            path = %path.display(),
            states = dataset.states.len(),
            districts = dataset.district_count(),
            "loaded disease dataset"
        );
        Ok(dataset)
    }

    /// Check structural invariants, collecting every violation.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut issues = Vec::new();

        let mut state_ids = BTreeSet::new();
        for state in &self.states {
            if state.id.as_str().trim().is_empty() {
                issues.push(format!("state {:?} has an empty id", state.name));
            }
            if !state_ids.insert(&state.id) {
                issues.push(format!("duplicate state id {:?}", state.id.as_str()));
            }
            let mut districts = BTreeSet::new();
            for district in &state.districts {
                if !districts.insert(district.name.as_str()) {
                    issues.push(format!(
                        "duplicate district {:?} in state {:?}",
                        district.name,
                        state.id.as_str()
                    ));
                }
            }
        }

        let mut keys = BTreeSet::new();
        for key in &self.diseases {
            if !keys.insert(key) {
                issues.push(format!("duplicate disease key {:?}", key.as_str()));
            }
            if !self.disease_names.contains_key(key) {
                issues.push(format!("disease {:?} has no display name", key.as_str()));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(DatasetError::Invalid { issues })
        }
    }

    pub fn has_disease(&self, key: &DiseaseKey) -> bool {
        self.diseases.contains(key)
    }

    pub fn district_count(&self) -> usize {
        self.states.iter().map(|s| s.districts.len()).sum()
    }
}
