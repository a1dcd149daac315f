// SPDX-License-Identifier: BUSL-1.1
//! # District Gazetteer
//!
//! Static `(state, district) → coordinates` table used for map markers whose
//! source record carries no coordinates of its own. Also holds the default
//! map viewport.
//!
//! States are keyed by dataset id. Lookups accept either the id or the
//! display name (`"Arunachal Pradesh"` normalizes to `"arunachal-pradesh"`).

use std::collections::BTreeMap;

use serde::Deserialize;
use wbd_core::{Coordinates, StateId};

use crate::error::DatasetError;

const NORTHEAST_COORDINATES_YAML: &str = include_str!("../data/coordinates.yaml");

#[derive(Debug, Deserialize)]
struct GazetteerFile {
    center: Coordinates,
    zoom: u8,
    states: BTreeMap<StateId, BTreeMap<String, Coordinates>>,
}

/// Immutable district coordinate lookup.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    center: Coordinates,
    zoom: u8,
    states: BTreeMap<StateId, BTreeMap<String, Coordinates>>,
}

impl Gazetteer {
    /// The built-in Northeast India gazetteer.
    pub fn northeast() -> Result<Self, DatasetError> {
        Self::from_yaml_str(NORTHEAST_COORDINATES_YAML)
    }

    /// Parse a gazetteer document, rejecting out-of-range coordinates.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DatasetError> {
        let file: GazetteerFile = serde_yaml::from_str(yaml)?;

        let mut issues = Vec::new();
        if !file.center.is_valid() {
            issues.push("map center is not a valid coordinate".to_string());
        }
        for (state, districts) in &file.states {
            for (district, coords) in districts {
                if !coords.is_valid() {
                    issues.push(format!(
                        "invalid coordinates for {district:?} in {:?}",
                        state.as_str()
                    ));
                }
            }
        }
        if !issues.is_empty() {
            return Err(DatasetError::Invalid { issues });
        }

        Ok(Self {
            center: file.center,
            zoom: file.zoom,
            states: file.states,
        })
    }

    /// A gazetteer that resolves nothing.
    pub fn empty(center: Coordinates, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            states: BTreeMap::new(),
        }
    }

    /// Coordinates for a district. District names match exactly first, then
    /// ignoring ASCII case.
    pub fn lookup(&self, state: &str, district: &str) -> Option<Coordinates> {
        let districts = self.states.get(&StateId::from_display_name(state))?;
        districts.get(district).copied().or_else(|| {
            districts
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(district))
                .map(|(_, c)| *c)
        })
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn len(&self) -> usize {
        self.states.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
