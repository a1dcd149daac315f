// SPDX-License-Identifier: BUSL-1.1
//! # Text Rendering
//!
//! Plain-text renderings of view-model sections. Every function returns the
//! full output as a `String`; printing is left to the caller.

use std::fmt::Write as _;

use clap::ValueEnum;
use wbd_view::{AggregateStats, DashboardView, MapMarker, TableRow};

/// Output format for view sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Aligned `District | Cases | Risk` table.
pub fn render_table(rows: &[TableRow]) -> String {
    if rows.is_empty() {
        return "No districts match.\n".to_string();
    }
    let cases: Vec<String> = rows.iter().map(|r| r.cases.to_string()).collect();
    let district_w = rows
        .iter()
        .map(|r| r.district.chars().count())
        .chain(std::iter::once("District".len()))
        .max()
        .unwrap_or(0);
    let cases_w = cases
        .iter()
        .map(String::len)
        .chain(std::iter::once("Cases".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{:<district_w$}  {:>cases_w$}  Risk", "District", "Cases");
    let _ = writeln!(out, "{}", "-".repeat(district_w + cases_w + 8));
    for (row, cases) in rows.iter().zip(&cases) {
        let _ = writeln!(
            out,
            "{:<district_w$}  {:>cases_w$}  {}",
            row.district,
            cases,
            row.risk_level.label()
        );
    }
    out
}

pub fn render_stats(stats: &AggregateStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total cases:     {}", stats.total_cases);
    let _ = writeln!(out, "Districts:       {}", stats.district_count);
    let _ = writeln!(out, "High risk:       {}", stats.high_risk_count);
    let _ = writeln!(out, "Medium risk:     {}", stats.medium_risk_count);
    let _ = writeln!(out, "Low risk:        {}", stats.low_risk_count);
    out
}

/// One line per marker: district, position, cases, band and interval.
pub fn render_markers(markers: &[MapMarker]) -> String {
    if markers.is_empty() {
        return "No markers.\n".to_string();
    }
    let mut out = String::new();
    for m in markers {
        let _ = write!(
            out,
            "{} @ [{:.4}, {:.4}]  {} cases  {}",
            m.district,
            m.position.lat,
            m.position.lng,
            m.cases,
            m.risk_level.label()
        );
        if m.confidence_lower != m.cases.value() || m.confidence_upper != m.cases.value() {
            let _ = write!(
                out,
                "  ({:.1} to {:.1})",
                m.confidence_lower, m.confidence_upper
            );
        }
        if let Some(date) = &m.date {
            let _ = write!(out, "  {date}");
        }
        out.push('\n');
    }
    out
}

/// Header naming the selection, then every section.
pub fn render_view(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} / {} ({:?})",
        view.selection.state, view.selection.disease, view.status
    );
    if let Some(message) = &view.message {
        let _ = writeln!(out, "{message}");
    }
    out.push('\n');
    out.push_str(&render_table(&view.table));
    out.push('\n');
    out.push_str(&render_stats(&view.stats));
    out.push('\n');
    out.push_str(&render_markers(&view.markers));
    out
}
