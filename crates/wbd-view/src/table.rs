// SPDX-License-Identifier: BUSL-1.1
//! District table: filter, sort, classify.

use serde::Serialize;
use wbd_core::{CaseCount, RiskLevel};

use crate::source::SourceRecord;

/// One row of the district table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub district: String,
    pub cases: CaseCount,
    pub risk_level: RiskLevel,
}

/// Build the table for `records`.
///
/// Districts whose name contains `search_term` (case-insensitive) are kept,
/// sorted by cases descending. Ties keep their source order.
pub fn derive_table(records: &[SourceRecord], search_term: &str) -> Vec<TableRow> {
    let needle = search_term.to_lowercase();
    let mut rows: Vec<TableRow> = records
        .iter()
        .filter(|r| needle.is_empty() || r.district.to_lowercase().contains(&needle))
        .map(|r| TableRow {
            district: r.district.clone(),
            cases: r.cases,
            risk_level: RiskLevel::classify(r.cases.value()),
        })
        .collect();
    // `sort_by` is stable.
    rows.sort_by(|a, b| b.cases.value().total_cmp(&a.cases.value()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(district: &str, cases: f64) -> SourceRecord {
        SourceRecord::new(district, CaseCount::new(cases))
    }

    fn names(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.district.as_str()).collect()
    }

    #[test]
    fn sorts_descending_and_keeps_tie_order() {
        let rows = derive_table(&[rec("A", 50.0), rec("B", 50.0), rec("C", 80.0)], "");
        assert_eq!(names(&rows), ["C", "A", "B"]);
        assert_eq!(rows[0].risk_level, RiskLevel::High);
        assert_eq!(rows[1].risk_level, RiskLevel::Medium);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = [rec("East Khasi Hills", 38.0), rec("Ri Bhoi", 31.0), rec("West Khasi Hills", 12.0)];
        assert_eq!(names(&derive_table(&records, "KHASI")), ["East Khasi Hills", "West Khasi Hills"]);
        assert_eq!(names(&derive_table(&records, "bho")), ["Ri Bhoi"]);
        assert!(derive_table(&records, "zzz").is_empty());
    }

    #[test]
    fn empty_search_returns_everything() {
        let records = [rec("Kohima", 35.0), rec("Dimapur", 52.0)];
        assert_eq!(names(&derive_table(&records, "")), ["Dimapur", "Kohima"]);
    }

    #[test]
    fn missing_cases_are_zero_and_low() {
        let rows = derive_table(&[rec("Mon", f64::NAN), rec("Peren", -4.0)], "");
        for row in rows {
            assert_eq!(row.cases, CaseCount::ZERO);
            assert_eq!(row.risk_level, RiskLevel::Low);
        }
    }

    #[test]
    fn row_serializes_camel_case() {
        let rows = derive_table(&[rec("Guwahati", 78.0)], "");
        assert_eq!(
            serde_json::to_value(&rows[0]).unwrap(),
            serde_json::json!({"district": "Guwahati", "cases": 78, "riskLevel": "High"})
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn records() -> impl Strategy<Value = Vec<SourceRecord>> {
            prop::collection::vec(("[a-zA-Z ]{1,12}", -10.0f64..200.0), 0..20).prop_map(|v| {
                v.into_iter()
                    .map(|(name, cases)| SourceRecord::new(name, CaseCount::new(cases)))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn derivation_is_idempotent(records in records(), term in "[a-z]{0,3}") {
                prop_assert_eq!(derive_table(&records, &term), derive_table(&records, &term));
            }

            #[test]
            fn search_only_narrows(records in records(), term in "[a-z]{0,3}") {
                let all = derive_table(&records, "");
                let some = derive_table(&records, &term);
                prop_assert!(some.len() <= all.len());
                for row in &some {
                    prop_assert!(all.contains(row));
                }
            }

            #[test]
            fn output_is_sorted(records in records()) {
                let rows = derive_table(&records, "");
                prop_assert_eq!(rows.len(), records.len());
                for pair in rows.windows(2) {
                    prop_assert!(pair[0].cases.value() >= pair[1].cases.value());
                }
            }
        }
    }
}
