//! Derived views the dashboard charts read off a published document:
//! per-period net change with percentages, and per-year class shares.
//!
//! Values here are full precision; formatting is left to the consumer.

use serde::Serialize;

use crate::aggregate::{totals_for_year, YearClassTotals};
use crate::rounding::percent_of;

/// Net change of one class over a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChange {
    pub class: String,
    pub before: f64,
    pub after: f64,
    pub change: f64,
    /// `change / before × 100`; 0 when `before` is 0.
    pub pct_change: f64,
}

/// One class's slice of a year's study area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassShare {
    pub class: String,
    pub area: f64,
    pub share_pct: f64,
}

/// Per-class change between two surveyed years, in class order.
///
/// `None` if either year is missing from `totals`.
pub fn period_changes(
    totals: &[YearClassTotals],
    from_year: i32,
    to_year: i32,
) -> Option<Vec<PeriodChange>> {
    let from = totals_for_year(totals, from_year)?;
    let to = totals_for_year(totals, to_year)?;

    let rows = from
        .totals
        .keys()
        .map(|class| {
            let before = from.area(class);
            let after = to.area(class);
            let change = after - before;
            PeriodChange {
                class: class.to_owned(),
                before,
                after,
                change,
                pct_change: percent_of(change, before),
            }
        })
        .collect();
    Some(rows)
}

/// Classes with non-zero area in `year`, with their percentage of the total.
pub fn class_shares(totals: &[YearClassTotals], year: i32) -> Option<Vec<ClassShare>> {
    let t = totals_for_year(totals, year)?;
    let total = t.total();
    let shares = t
        .totals
        .iter()
        .filter(|(_, &area)| area > 0.0)
        .map(|(class, &area)| ClassShare {
            class: class.to_owned(),
            area,
            share_pct: percent_of(area, total),
        })
        .collect();
    Some(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_map::ClassMap;
    use approx::assert_relative_eq;

    fn totals() -> Vec<YearClassTotals> {
        let classes: Vec<String> = vec!["Water".into(), "Trees".into(), "BuiltUp".into()];
        vec![
            YearClassTotals {
                year: 2015,
                totals: ClassMap::from_values(&classes, [8.0, 12.0, 0.0]),
            },
            YearClassTotals {
                year: 2025,
                totals: ClassMap::from_values(&classes, [6.0, 9.0, 5.0]),
            },
        ]
    }

    #[test]
    fn change_and_percentage() {
        let rows = period_changes(&totals(), 2015, 2025).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].class, "Water");
        assert_relative_eq!(rows[0].change, -2.0);
        assert_relative_eq!(rows[0].pct_change, -25.0);
        assert_relative_eq!(rows[1].pct_change, -25.0);
    }

    #[test]
    fn zero_baseline_yields_zero_percent() {
        let rows = period_changes(&totals(), 2015, 2025).unwrap();
        let built = &rows[2];
        assert_eq!(built.before, 0.0);
        assert_eq!(built.change, 5.0);
        assert_eq!(built.pct_change, 0.0);
        assert!(built.pct_change.is_finite());
    }

    #[test]
    fn unknown_year_is_none() {
        assert!(period_changes(&totals(), 2015, 2030).is_none());
        assert!(class_shares(&totals(), 1900).is_none());
    }

    #[test]
    fn shares_skip_empty_classes_and_sum_to_100() {
        let shares = class_shares(&totals(), 2015).unwrap();
        assert_eq!(shares.len(), 2);
        assert_relative_eq!(shares[0].share_pct, 40.0);
        let sum: f64 = shares.iter().map(|s| s.share_pct).sum();
        assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn shares_of_empty_year() {
        let classes: Vec<String> = vec!["Water".into()];
        let t = vec![YearClassTotals { year: 1, totals: ClassMap::filled(&classes, 0.0) }];
        assert!(class_shares(&t, 1).unwrap().is_empty());
    }
}
