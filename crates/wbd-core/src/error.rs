// SPDX-License-Identifier: BUSL-1.1
//! # Error Taxonomy
//!
//! Every data source reports failures as one of three kinds. None of them is
//! fatal: the view layer turns each into an empty view-model with a status
//! the renderer can show.

use thiserror::Error;

/// Failure of a dataset query or a prediction fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Unknown state id or disease key.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network or service failure, including an `error` field in the response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response was missing expected fields.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl DashboardError {
    /// Transport and malformed-response failures are shown the same way.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::MalformedResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DashboardError::NotFound("State not found".into()).to_string(),
            "not found: State not found"
        );
        assert!(DashboardError::Transport("refused".into())
            .to_string()
            .contains("refused"));
    }

    #[test]
    fn unavailable_classification() {
        assert!(!DashboardError::NotFound("x".into()).is_unavailable());
        assert!(DashboardError::Transport("x".into()).is_unavailable());
        assert!(DashboardError::MalformedResponse("x".into()).is_unavailable());
    }
}
