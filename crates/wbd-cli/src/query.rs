// SPDX-License-Identifier: BUSL-1.1
//! # Dataset Queries
//!
//! `wbd states` lists the dataset's states. `wbd query` prints the same four
//! JSON shapes as `GET /diseases`, chosen by which of `--state` and
//! `--disease` are given.

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use wbd_core::{DiseaseKey, StateId};
use wbd_dataset::DatasetRepository;

use crate::context::CliContext;

/// Arguments for `wbd query`.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// State id, e.g. `assam`.
    #[arg(long)]
    pub state: Option<String>,

    /// Disease key, e.g. `cholera`.
    #[arg(long)]
    pub disease: Option<String>,
}

/// Resolve `args` against `repo`; unknown states and diseases are errors.
pub fn query(repo: &DatasetRepository, args: &QueryArgs) -> Result<Value> {
    let state = args.state.as_deref().filter(|s| !s.is_empty()).map(StateId::new);
    let disease = args.disease.as_deref().filter(|d| !d.is_empty()).map(DiseaseKey::new);

    let value = match (state, disease) {
        (Some(state), Some(disease)) => {
            serde_json::to_value(repo.get_by_state_and_disease(&state, &disease)?)?
        }
        (Some(state), None) => serde_json::to_value(repo.get_by_state(&state)?)?,
        (None, Some(disease)) => serde_json::to_value(repo.get_by_disease(&disease)?)?,
        (None, None) => serde_json::to_value(repo.get_all())?,
    };
    Ok(value)
}

pub fn run_query(args: &QueryArgs, ctx: &CliContext) -> Result<u8> {
    let repo = ctx.repository()?;
    println!("{}", serde_json::to_string_pretty(&query(&repo, args)?)?);
    Ok(0)
}

/// `id  name  (N districts)` per state, in dataset order.
pub fn list_states(repo: &DatasetRepository) -> Vec<String> {
    let states = &repo.get_all().states;
    let width = states.iter().map(|s| s.id.as_str().len()).max().unwrap_or(0);
    states
        .iter()
        .map(|s| {
            format!(
                "{:<width$}  {}  ({} districts)",
                s.id.as_str(),
                s.name,
                s.districts.len()
            )
        })
        .collect()
}

pub fn run_states(ctx: &CliContext) -> Result<u8> {
    let repo = ctx.repository()?;
    for line in list_states(&repo) {
        println!("{line}");
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo() -> DatasetRepository {
        DatasetRepository::northeast().unwrap()
    }

    fn args(state: Option<&str>, disease: Option<&str>) -> QueryArgs {
        QueryArgs {
            state: state.map(String::from),
            disease: disease.map(String::from),
        }
    }

    #[test]
    fn state_and_disease_shape() {
        let value = query(&repo(), &args(Some("sikkim"), Some("typhoid"))).unwrap();
        assert_eq!(value["state"], "Sikkim");
        assert_eq!(value["disease"], "Typhoid");
        assert_eq!(value["data"][0], json!({"district": "East Sikkim", "cases": 15}));
    }

    #[test]
    fn disease_only_shape() {
        let value = query(&repo(), &args(None, Some("hepatitisA"))).unwrap();
        assert_eq!(value["disease"], "Hepatitis A");
        assert_eq!(value["data"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn no_filters_returns_dataset() {
        let value = query(&repo(), &QueryArgs::default()).unwrap();
        assert_eq!(value["states"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn unknown_names_are_errors() {
        let err = query(&repo(), &args(Some("goa"), None)).unwrap_err();
        assert_eq!(err.to_string(), "State not found");
        let err = query(&repo(), &args(Some("assam"), Some("plague"))).unwrap_err();
        assert_eq!(err.to_string(), "Disease not found");
    }

    #[test]
    fn states_are_listed_in_order() {
        let lines = list_states(&repo());
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "assam              Assam  (5 districts)");
        assert!(lines[1].starts_with("arunachal-pradesh  Arunachal Pradesh"));
    }
}
