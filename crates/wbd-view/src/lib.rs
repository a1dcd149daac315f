// SPDX-License-Identifier: BUSL-1.1
//! # wbd-view — View-Model Derivation
//!
//! Turns fetched records and a user selection into what the dashboard
//! renders:
//!
//! - [`derive_table`]: searchable district table, sorted by cases;
//! - [`aggregate`]: total cases and risk-band counts, independent of search;
//! - [`derive_markers`]: classified, positioned map markers.
//!
//! All three are pure functions of their inputs and classify through
//! [`wbd_core::RiskLevel::classify`].
//!
//! [`DashboardController`] ties them to a [`DataSource`] and keeps only the
//! newest fetch result.

pub mod aggregate;
pub mod controller;
pub mod markers;
pub mod selection;
pub mod source;
pub mod table;

pub use aggregate::{aggregate, AggregateStats};
pub use controller::{
    Completion, DashboardController, DashboardView, FetchTicket, RequestToken, ViewStatus,
};
pub use markers::{derive_markers, MapMarker};
pub use selection::SelectionState;
pub use source::{DataSource, DatasetSource, ForecastSource, Snapshot, SourceRecord};
pub use table::{derive_table, TableRow};
