// SPDX-License-Identifier: BUSL-1.1
//! Dataset loading and lookup errors.

use wbd_core::{DashboardError, DiseaseKey, StateId};

/// Errors from loading or querying the disease dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// No state with this id.
    #[error("State not found")]
    StateNotFound(StateId),

    /// Disease key is not listed in the dataset.
    #[error("Disease not found")]
    DiseaseNotFound(DiseaseKey),

    /// YAML document could not be parsed.
    #[error("failed to parse dataset YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON document could not be parsed.
    #[error("failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Parsed dataset violates a structural invariant.
    #[error("invalid dataset: {}", .issues.join("; "))]
    Invalid { issues: Vec<String> },
}

impl DatasetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StateNotFound(_) | Self::DiseaseNotFound(_))
    }
}

impl From<DatasetError> for DashboardError {
    fn from(err: DatasetError) -> Self {
        if err.is_not_found() {
            DashboardError::NotFound(err.to_string())
        } else {
            DashboardError::MalformedResponse(err.to_string())
        }
    }
}
