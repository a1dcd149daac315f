// SPDX-License-Identifier: BUSL-1.1
//! # Validate Subcommand
//!
//! `wbd validate <path>` parses a YAML or JSON dataset file and runs the
//! structural checks applied at load time. It also reports districts the
//! gazetteer cannot place; with `--strict` those fail validation too.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use wbd_dataset::{DiseaseDataset, Gazetteer};

/// Arguments for `wbd validate`.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Dataset file (`.yaml`, `.yml` or `.json`).
    pub path: PathBuf,

    /// Fail when a district has no gazetteer coordinates.
    #[arg(long)]
    pub strict: bool,
}

/// `state/district` for every district the gazetteer cannot place.
pub fn unplaced_districts(dataset: &DiseaseDataset, gazetteer: &Gazetteer) -> Vec<String> {
    dataset
        .states
        .iter()
        .flat_map(|state| {
            state
                .districts
                .iter()
                .filter(|d| gazetteer.lookup(state.id.as_str(), &d.name).is_none())
                .map(move |d| format!("{}/{}", state.id, d.name))
        })
        .collect()
}

pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let dataset = DiseaseDataset::from_path(&args.path)
        .with_context(|| format!("validating {}", args.path.display()))?;
    let gazetteer = Gazetteer::northeast().context("loading built-in gazetteer")?;

    let unplaced = unplaced_districts(&dataset, &gazetteer);
    for district in &unplaced {
        eprintln!("WARN: no coordinates for {district}; it will have no map marker");
    }
    if args.strict && !unplaced.is_empty() {
        bail!(
            "{}: {} district(s) without coordinates",
            args.path.display(),
            unplaced.len()
        );
    }

    println!(
        "OK: {}: {} states, {} districts, {} diseases",
        args.path.display(),
        dataset.states.len(),
        dataset.district_count(),
        dataset.diseases.len()
    );
    Ok(0)
}
