// SPDX-License-Identifier: BUSL-1.1
//! # wbd-dataset — Dataset Repository
//!
//! Owns the canonical disease dataset and answers structural queries by
//! state, by disease, or both. Also owns the district gazetteer used to
//! place markers on the map.
//!
//! Both the dataset and the gazetteer are immutable values handed to their
//! owners at construction. The built-in Northeast India data is embedded as
//! YAML and parsed on demand; a different dataset can be loaded from a file
//! with [`DiseaseDataset::from_path`].

pub mod dataset;
pub mod error;
pub mod gazetteer;
pub mod repository;

pub use dataset::{DiseaseDataset, DistrictRecord, StateEntry};
pub use error::DatasetError;
pub use gazetteer::Gazetteer;
pub use repository::{
    DatasetRepository, DiseaseView, DistrictCases, StateDiseaseView, StateDistricts,
};
