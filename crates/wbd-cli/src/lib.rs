// SPDX-License-Identifier: BUSL-1.1
//! # wbd-cli — Command-Line Dashboard
//!
//! Provides the `wbd` command, a terminal renderer for the same view-models
//! the HTTP service serves.
//!
//! ## Subcommands
//!
//! - `wbd states` — List the dataset's states.
//! - `wbd query` — Dataset queries by state, disease, or both (JSON).
//! - `wbd table` / `wbd stats` / `wbd markers` — Derived view sections.
//! - `wbd forecast` — Derived view from the external predictor.
//! - `wbd targets` — Predictor target catalogue.
//! - `wbd validate` — Check a dataset file before deploying it.
//!
//! ```bash
//! wbd table --state assam --disease cholera --search gu
//! wbd forecast --state meghalaya --date 2023-12-12 --forecast-url http://localhost:5000
//! wbd validate data/northeast.yaml --strict
//! ```

pub mod context;
pub mod forecast;
pub mod query;
pub mod render;
pub mod validate;
pub mod view;

pub use context::CliContext;
