// SPDX-License-Identifier: BUSL-1.1
//! Summary statistics over the unfiltered record list.

use serde::{Deserialize, Serialize};
use wbd_core::{CaseCount, RiskLevel};

use crate::source::SourceRecord;

/// Totals shown in the dashboard's summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_cases: CaseCount,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub district_count: usize,
}

/// Compute statistics for `records`.
///
/// The search term never reaches this function. A `delegated_total`
/// replaces the local sum of cases; risk counts are always local.
pub fn aggregate(records: &[SourceRecord], delegated_total: Option<CaseCount>) -> AggregateStats {
    let mut stats = AggregateStats {
        district_count: records.len(),
        ..AggregateStats::default()
    };
    let mut sum = 0.0;
    for record in records {
        sum += record.cases.value();
        match RiskLevel::classify(record.cases.value()) {
            RiskLevel::High => stats.high_risk_count += 1,
            RiskLevel::Medium => stats.medium_risk_count += 1,
            RiskLevel::Low => stats.low_risk_count += 1,
        }
    }
    stats.total_cases = delegated_total.unwrap_or_else(|| CaseCount::new(sum));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(district: &str, cases: f64) -> SourceRecord {
        SourceRecord::new(district, CaseCount::new(cases))
    }

    #[test]
    fn counts_each_band() {
        let stats = aggregate(
            &[rec("Guwahati", 78.0), rec("Kamrup", 45.0), rec("Silchar", 29.0)],
            None,
        );
        assert_eq!(stats.total_cases, CaseCount::from(152u64));
        assert_eq!(stats.high_risk_count, 1);
        assert_eq!(stats.medium_risk_count, 1);
        assert_eq!(stats.low_risk_count, 1);
        assert_eq!(stats.district_count, 3);
    }

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(aggregate(&[], None), AggregateStats::default());
    }

    #[test]
    fn delegated_total_replaces_sum() {
        let stats = aggregate(&[rec("Aizawl", 10.0)], Some(CaseCount::new(999.0)));
        assert_eq!(stats.total_cases.value(), 999.0);
        assert_eq!(stats.low_risk_count, 1);
    }

    #[test]
    fn invalid_counts_contribute_zero() {
        let stats = aggregate(&[rec("Mon", f64::NAN), rec("Wokha", f64::INFINITY)], None);
        assert_eq!(stats.total_cases, CaseCount::ZERO);
        assert!(!stats.total_cases.value().is_nan());
        assert_eq!(stats.low_risk_count, 2);
    }

    #[test]
    fn serializes_camel_case() {
        let stats = aggregate(&[rec("Guwahati", 78.0)], None);
        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            serde_json::json!({
                "totalCases": 78,
                "highRiskCount": 1,
                "mediumRiskCount": 0,
                "lowRiskCount": 0,
                "districtCount": 1
            })
        );
    }
}
