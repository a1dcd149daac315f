// SPDX-License-Identifier: BUSL-1.1
//! # Case Counts
//!
//! Raw case values arrive from hand-written YAML, from JSON produced by an
//! external predictor, or not at all. They all pass through one rule:
//!
//! | Input                         | Value      |
//! |-------------------------------|------------|
//! | absent / `null`               | `0`        |
//! | finite number `>= 0`          | the number |
//! | negative, NaN, infinite       | `0`        |
//! | numeric string (`"42"`)       | the number |
//! | any other string, bool, array | `0`        |
//!
//! Nothing downstream ever sees `NaN`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Apply the coercion rule to an already-numeric value.
pub fn coerce_cases(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A non-negative, finite case count.
///
/// Constructed only through [`CaseCount::new`] or deserialization, both of
/// which apply [`coerce_cases`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CaseCount(f64);

impl CaseCount {
    pub const ZERO: CaseCount = CaseCount(0.0);

    pub fn new(value: f64) -> Self {
        Self(coerce_cases(value))
    }

    /// Read an optional raw value, treating absence as zero.
    pub fn from_option(value: Option<f64>) -> Self {
        value.map(Self::new).unwrap_or(Self::ZERO)
    }

    /// Read a loosely-typed JSON value.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => Self::from_option(n.as_f64()),
            serde_json::Value::String(s) => Self::from_option(s.trim().parse::<f64>().ok()),
            _ => Self::ZERO,
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The count as an integer, when it is whole and fits in `u64`.
    fn as_whole(self) -> Option<u64> {
        (self.0.fract() == 0.0 && self.0 < u64::MAX as f64).then_some(self.0 as u64)
    }
}

impl From<u64> for CaseCount {
    fn from(n: u64) -> Self {
        Self::new(n as f64)
    }
}

impl std::fmt::Display for CaseCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_whole() {
            Some(n) => write!(f, "{n}"),
            None if self.0.fract() == 0.0 => write!(f, "{}", self.0),
            None => write!(f, "{:.2}", self.0),
        }
    }
}

impl Serialize for CaseCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole counts stay integers on the wire.
        match self.as_whole() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_f64(self.0),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for CaseCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCount::deserialize(deserializer)?;
        Ok(match raw {
            RawCount::Number(n) => Self::new(n),
            RawCount::Text(s) => Self::from_option(s.trim().parse::<f64>().ok()),
            RawCount::Other(_) => Self::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_table() {
        assert_eq!(coerce_cases(45.0), 45.0);
        assert_eq!(coerce_cases(0.0), 0.0);
        assert_eq!(coerce_cases(-1.0), 0.0);
        assert_eq!(coerce_cases(f64::NAN), 0.0);
        assert_eq!(coerce_cases(f64::INFINITY), 0.0);
        assert_eq!(coerce_cases(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn absent_value_is_zero() {
        assert_eq!(CaseCount::from_option(None), CaseCount::ZERO);
    }

    #[test]
    fn lenient_json_deserialization() {
        let parsed: Vec<CaseCount> =
            serde_json::from_str(r#"[12, 3.5, "42", "n/a", null, true, -7, [1], {"a": 1}]"#)
                .unwrap();
        let values: Vec<f64> = parsed.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![12.0, 3.5, 42.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn lenient_yaml_deserialization() {
        let parsed: Vec<CaseCount> = serde_yaml::from_str("[45, ~, abc, '7']").unwrap();
        let values: Vec<f64> = parsed.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![45.0, 0.0, 0.0, 7.0]);
    }

    #[test]
    fn whole_counts_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&CaseCount::new(78.0)).unwrap(), "78");
        assert_eq!(serde_json::to_string(&CaseCount::new(12.25)).unwrap(), "12.25");
    }

    #[test]
    fn from_json_value() {
        assert_eq!(CaseCount::from_json(&serde_json::json!(9)).value(), 9.0);
        assert_eq!(CaseCount::from_json(&serde_json::json!(" 9 ")).value(), 9.0);
        assert_eq!(CaseCount::from_json(&serde_json::json!(null)).value(), 0.0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(CaseCount::new(45.0).to_string(), "45");
        assert_eq!(CaseCount::new(45.129).to_string(), "45.13");
    }

    #[test]
    fn counts_beyond_u64_do_not_saturate() {
        let huge = CaseCount::new(1e20);
        assert_eq!(huge.to_string(), "100000000000000000000");

        let edge = CaseCount::new(2f64.powi(64));
        assert_ne!(edge.to_string(), u64::MAX.to_string());
        let wire = serde_json::to_value(edge).unwrap();
        assert!(wire.is_f64());
        assert_eq!(wire.as_f64(), Some(2f64.powi(64)));
    }
}
