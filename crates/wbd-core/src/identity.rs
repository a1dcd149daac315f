// SPDX-License-Identifier: BUSL-1.1
//! # Domain Identifier Newtypes
//!
//! State ids (`"assam"`, `"arunachal-pradesh"`) and disease keys
//! (`"cholera"`, `"diarrhea_cases"`) are both plain strings on the wire.
//! The newtypes keep them apart in signatures.

use serde::{Deserialize, Serialize};

/// Identifier of a state in the dataset, e.g. `"arunachal-pradesh"`.
///
/// Lookups against the dataset use exact matching on this value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub String);

/// Key of a disease column in the dataset, or a predictor target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseKey(pub String);

impl StateId {
    /// Wrap a raw state id without normalization.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id form of a state display name.
    ///
    /// `"Arunachal Pradesh"` becomes `"arunachal-pradesh"`. Ids pass through
    /// unchanged, so the function is idempotent.
    pub fn from_display_name(name: &str) -> Self {
        let id = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DiseaseKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for DiseaseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for DiseaseKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
