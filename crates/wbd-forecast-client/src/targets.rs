// SPDX-License-Identifier: BUSL-1.1
//! Forecast targets known to the predictor and their display names.

use serde::Serialize;

/// Target keys the predictor is trained on, with display names.
pub const FORECAST_TARGETS: &[(&str, &str)] = &[
    ("diarrhea_cases", "Diarrhea"),
    ("enteric_fever_cases", "Enteric Fever"),
    ("je_cases", "Japanese Encephalitis"),
];

/// Target used when a caller does not pick one.
pub const DEFAULT_TARGET: &str = "diarrhea_cases";

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastTarget {
    pub key: String,
    pub name: String,
}

pub fn targets() -> Vec<ForecastTarget> {
    FORECAST_TARGETS
        .iter()
        .map(|(key, name)| ForecastTarget {
            key: key.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// Display name from the catalogue, else derived with [`pretty_target_name`].
pub fn target_display_name(key: &str) -> String {
    FORECAST_TARGETS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| pretty_target_name(key))
}

/// `"enteric_fever_cases"` → `"Enteric Fever"`: drop the first `_cases`,
/// underscores become spaces, each word is capitalized.
pub fn pretty_target_name(key: &str) -> String {
    key.replacen("_cases", "", 1)
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_names() {
        assert_eq!(pretty_target_name("diarrhea_cases"), "Diarrhea");
        assert_eq!(pretty_target_name("enteric_fever_cases"), "Enteric Fever");
        assert_eq!(pretty_target_name("je_cases"), "Je");
        assert_eq!(pretty_target_name(""), "");
    }

    #[test]
    fn catalogue_names_win() {
        assert_eq!(target_display_name("je_cases"), "Japanese Encephalitis");
        assert_eq!(target_display_name("cholera_cases"), "Cholera");
    }

    #[test]
    fn default_target_is_in_catalogue() {
        assert!(targets().iter().any(|t| t.key == DEFAULT_TARGET));
        assert_eq!(targets().len(), 3);
    }
}
