// SPDX-License-Identifier: BUSL-1.1
//! # View Subcommands
//!
//! `wbd table`, `wbd stats` and `wbd markers` derive the dashboard view for
//! one selection from the dataset and print one section of it. With
//! `--format json` the whole view-model is printed instead.

use anyhow::{bail, Result};
use clap::Args;
use wbd_core::{DiseaseKey, StateId};
use wbd_view::{DashboardView, DatasetSource, SelectionState, ViewStatus};

use crate::context::CliContext;
use crate::render::{render_markers, render_stats, render_table, OutputFormat};

/// Arguments shared by `wbd table`, `wbd stats` and `wbd markers`.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// State id, e.g. `assam`.
    #[arg(long)]
    pub state: String,

    /// Disease key. Defaults to the dataset's first disease.
    #[arg(long)]
    pub disease: Option<String>,

    /// Case-insensitive district filter (table only).
    #[arg(long, default_value = "")]
    pub search: String,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Which part of the view to print in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Table,
    Stats,
    Markers,
}

/// Derive the view for `args` from the dataset.
pub fn derive_view(args: &ViewArgs, ctx: &CliContext) -> Result<DashboardView> {
    let repository = ctx.repository()?;
    let gazetteer = ctx.gazetteer()?;
    let disease = match args.disease.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => DiseaseKey::new(d),
        None => match repository.default_disease() {
            Some(d) => d.clone(),
            None => bail!("dataset lists no diseases"),
        },
    };
    let selection = SelectionState {
        state: StateId::new(args.state.as_str()),
        disease,
        search_term: args.search.clone(),
    };

    let source = DatasetSource::new(repository);
    Ok(match source.snapshot(&selection) {
        Ok(snapshot) => DashboardView::derive(selection, &snapshot, &gazetteer),
        Err(e) => DashboardView::failed(selection, &e),
    })
}

pub fn run_view(args: &ViewArgs, ctx: &CliContext, section: Section) -> Result<u8> {
    let view = derive_view(args, ctx)?;

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(if view.status == ViewStatus::Ready { 0 } else { 1 });
    }

    if view.status != ViewStatus::Ready {
        bail!(
            "{} / {}: {}",
            view.selection.state,
            view.selection.disease,
            view.message.as_deref().unwrap_or("no data")
        );
    }

    let text = match section {
        Section::Table => render_table(&view.table),
        Section::Stats => render_stats(&view.stats),
        Section::Markers => render_markers(&view.markers),
    };
    print!("{text}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbd_core::CaseCount;

    fn args(state: &str, disease: Option<&str>, search: &str) -> ViewArgs {
        ViewArgs {
            state: state.into(),
            disease: disease.map(String::from),
            search: search.into(),
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn assam_cholera_view() {
        let view = derive_view(&args("assam", Some("cholera"), ""), &CliContext::default()).unwrap();
        assert_eq!(view.status, ViewStatus::Ready);
        assert_eq!(view.table[0].district, "Guwahati");
        assert_eq!(view.stats.total_cases, CaseCount::from(205u64));
        assert_eq!(view.markers.len(), 5);
    }

    #[test]
    fn disease_defaults_to_first() {
        let view = derive_view(&args("tripura", None, "west"), &CliContext::default()).unwrap();
        assert_eq!(view.selection.disease, DiseaseKey::new("cholera"));
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.table[0].district, "West Tripura");
    }

    #[test]
    fn unknown_state_fails_in_text_mode() {
        let ctx = CliContext::default();
        let view = derive_view(&args("goa", Some("cholera"), ""), &ctx).unwrap();
        assert_eq!(view.status, ViewStatus::NotFound);
        assert!(run_view(&args("goa", Some("cholera"), ""), &ctx, Section::Table).is_err());
    }

    #[test]
    fn json_mode_reports_status_through_exit_code() {
        let ctx = CliContext::default();
        let mut a = args("goa", Some("cholera"), "");
        a.format = OutputFormat::Json;
        assert_eq!(run_view(&a, &ctx, Section::Stats).unwrap(), 1);
        a.state = "assam".into();
        assert_eq!(run_view(&a, &ctx, Section::Stats).unwrap(), 0);
    }
}
