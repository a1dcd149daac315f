// SPDX-License-Identifier: BUSL-1.1
//! # Route Modules
//!
//! | Path                   | Module        | Source                  |
//! |------------------------|---------------|-------------------------|
//! | `/diseases`            | [`diseases`]  | dataset, raw shapes     |
//! | `/map-data`            | [`map_data`]  | dataset + gazetteer     |
//! | `/v1/dashboard`        | [`dashboard`] | dataset, derived view   |
//! | `/v1/forecast`         | [`forecast`]  | predictor, derived view |
//! | `/v1/forecast/targets` | [`forecast`]  | target catalogue        |

pub mod dashboard;
pub mod diseases;
pub mod forecast;
pub mod map_data;
