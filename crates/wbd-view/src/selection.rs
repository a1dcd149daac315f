// SPDX-License-Identifier: BUSL-1.1
//! The user's current selection.

use serde::{Deserialize, Serialize};
use wbd_core::{DiseaseKey, StateId};

/// Which state and disease are shown, and the table filter.
///
/// The search term only narrows the table; changing it never requires a
/// refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub state: StateId,
    pub disease: DiseaseKey,
    #[serde(default)]
    pub search_term: String,
}

impl SelectionState {
    pub fn new(state: impl Into<StateId>, disease: impl Into<DiseaseKey>) -> Self {
        Self {
            state: state.into(),
            disease: disease.into(),
            search_term: String::new(),
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// True when both selections would fetch the same data.
    pub fn same_source(&self, other: &SelectionState) -> bool {
        self.state == other.state && self.disease == other.disease
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_does_not_change_source() {
        let a = SelectionState::new("assam", "cholera");
        let b = a.clone().with_search("kam");
        assert!(a.same_source(&b));
        assert_ne!(a, b);
        assert!(!a.same_source(&SelectionState::new("assam", "typhoid")));
    }

    #[test]
    fn deserializes_without_search_term() {
        let s: SelectionState =
            serde_json::from_str(r#"{"state":"tripura","disease":"diarrhea"}"#).unwrap();
        assert_eq!(s.search_term, "");
        assert_eq!(s.state.as_str(), "tripura");
    }
}
