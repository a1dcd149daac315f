// SPDX-License-Identifier: BUSL-1.1
//! # Risk Classification
//!
//! Bands are inclusive on their lower bound:
//!
//! | Cases          | Level    | Marker colour | Radius |
//! |----------------|----------|---------------|--------|
//! | `c >= 70`      | `High`   | `#ef4444`     | 12     |
//! | `30 <= c < 70` | `Medium` | `#eab308`     | 10     |
//! | `c < 30`       | `Low`    | `#22c55e`     | 8      |
//!
//! The table, the aggregate statistics and the map all call
//! [`RiskLevel::classify`].

use serde::{Deserialize, Serialize};

use crate::cases::coerce_cases;

/// Lower bound (inclusive) of the `High` band.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

/// Lower bound (inclusive) of the `Medium` band.
pub const MEDIUM_RISK_THRESHOLD: f64 = 30.0;

/// Risk band of a district's case count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a raw case value. The value is coerced first, so `-1` and
    /// `NaN` land in `Low`.
    pub fn classify(cases: f64) -> Self {
        let cases = coerce_cases(cases);
        if cases >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if cases >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Lowercase wire form used by the legacy `/map-data` payload.
    pub fn as_lowercase(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Popup label, e.g. `"High Risk"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }

    /// Visual weight of a map marker in this band.
    pub fn marker_style(self) -> MarkerStyle {
        let (color, radius) = match self {
            Self::High => ("#ef4444", 12),
            Self::Medium => ("#eab308", 10),
            Self::Low => ("#22c55e", 8),
        };
        MarkerStyle {
            color: color.to_string(),
            radius,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Colour and radius of a map marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// CSS hex colour.
    pub color: String,
    /// Radius in pixels.
    pub radius: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values() {
        let cases = [
            (-1.0, RiskLevel::Low),
            (0.0, RiskLevel::Low),
            (29.0, RiskLevel::Low),
            (30.0, RiskLevel::Medium),
            (69.0, RiskLevel::Medium),
            (70.0, RiskLevel::High),
            (1000.0, RiskLevel::High),
        ];
        for (c, expected) in cases {
            assert_eq!(RiskLevel::classify(c), expected, "classify({c})");
        }
    }

    #[test]
    fn fractional_values_near_boundaries() {
        assert_eq!(RiskLevel::classify(29.999), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(69.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(70.0001), RiskLevel::High);
    }

    #[test]
    fn nan_is_low() {
        assert_eq!(RiskLevel::classify(f64::NAN), RiskLevel::Low);
    }

    #[test]
    fn styles_grow_with_risk() {
        let low = RiskLevel::Low.marker_style();
        let medium = RiskLevel::Medium.marker_style();
        let high = RiskLevel::High.marker_style();
        assert!(low.radius < medium.radius && medium.radius < high.radius);
        assert_eq!(high.color, "#ef4444");
    }

    #[test]
    fn wire_forms() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High\"");
        assert_eq!(RiskLevel::Medium.as_lowercase(), "medium");
        assert_eq!(RiskLevel::Low.label(), "Low Risk");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Each band is exactly characterized by its threshold inequality.
        #[test]
        fn bands_partition_the_line(c in -1_000.0f64..10_000.0) {
            let level = RiskLevel::classify(c);
            let c = coerce_cases(c);
            prop_assert_eq!(level == RiskLevel::High, c >= HIGH_RISK_THRESHOLD);
            prop_assert_eq!(
                level == RiskLevel::Medium,
                (MEDIUM_RISK_THRESHOLD..HIGH_RISK_THRESHOLD).contains(&c)
            );
            prop_assert_eq!(level == RiskLevel::Low, c < MEDIUM_RISK_THRESHOLD);
        }

        /// Classification is monotone in the case count.
        #[test]
        fn classification_is_monotone(a in 0.0f64..500.0, b in 0.0f64..500.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(RiskLevel::classify(lo) <= RiskLevel::classify(hi));
        }
    }
}
