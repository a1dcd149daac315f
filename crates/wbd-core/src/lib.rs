// SPDX-License-Identifier: BUSL-1.1
//! # wbd-core — Foundational Types for the Disease Dashboard
//!
//! Every other crate in the workspace depends on `wbd-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `StateId` and `DiseaseKey` keep state ids and
//!    disease keys from being swapped at call sites.
//!
//! 2. **One coercion rule for counts.** [`CaseCount`] is the only way a raw
//!    case value enters the system. Absent, non-numeric, negative, NaN and
//!    infinite values all become `0`.
//!
//! 3. **One risk classifier.** [`RiskLevel::classify`] is shared by the table,
//!    the aggregate statistics and the map markers. Thresholds live here and
//!    nowhere else.
//!
//! 4. **Three error kinds.** [`DashboardError`] is the taxonomy every data
//!    source reports in: not found, transport, malformed response.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wbd-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod cases;
pub mod error;
pub mod geo;
pub mod identity;
pub mod risk;

pub use cases::{coerce_cases, CaseCount};
pub use error::DashboardError;
pub use geo::Coordinates;
pub use identity::{DiseaseKey, StateId};
pub use risk::{MarkerStyle, RiskLevel, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
