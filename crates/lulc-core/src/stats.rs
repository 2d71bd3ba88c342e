//! Headline statistics over the first and last survey years.
//!
//! Extremal selection scans classes in vocabulary order and only replaces the
//! current pick on a strictly better value, so the earliest class wins ties.
//! Changes are computed at full precision and rounded to 2 decimals once,
//! when the statistics are assembled.

use serde::{Deserialize, Serialize};

use crate::aggregate::YearClassTotals;
use crate::rounding::round_to;

const STAT_DECIMALS: i32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassChange {
    pub class: String,
    /// Signed last-year minus first-year area (km², 2 decimals).
    pub change: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    /// First-year study area (km², 2 decimals).
    pub total_area: f64,
    pub biggest_growth: ClassChange,
    pub biggest_decline: ClassChange,
    /// Class with the largest area in the last survey year.
    pub dominant_class: String,
}

/// Index of the first maximum under `better(candidate, best)`.
fn first_extreme(values: &[f64], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if better(v, values[best]) {
            best = i;
        }
    }
    best
}

/// Compute the summary from per-year totals ordered chronologically.
///
/// Uses `totals[0]` and `totals[len - 1]` explicitly. Returns `None` when
/// there are no years or no classes.
pub fn compute_summary(totals: &[YearClassTotals]) -> Option<SummaryStatistics> {
    let first = totals.first()?;
    let last = totals.last()?;
    if first.totals.is_empty() {
        return None;
    }

    let classes: Vec<&str> = first.totals.keys().collect();
    let changes: Vec<f64> = classes.iter().map(|c| last.area(c) - first.area(c)).collect();
    let last_areas: Vec<f64> = classes.iter().map(|c| last.area(c)).collect();

    let growth = first_extreme(&changes, |a, b| a > b);
    let decline = first_extreme(&changes, |a, b| a < b);
    let dominant = first_extreme(&last_areas, |a, b| a > b);

    let class_change = |i: usize| ClassChange {
        class: classes[i].to_owned(),
        change: round_to(changes[i], STAT_DECIMALS),
    };

    Some(SummaryStatistics {
        total_area: round_to(first.total(), STAT_DECIMALS),
        biggest_growth: class_change(growth),
        biggest_decline: class_change(decline),
        dominant_class: classes[dominant].to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_map::ClassMap;

    fn year(year: i32, areas: &[f64]) -> YearClassTotals {
        let classes: Vec<String> =
            ["Water", "Trees", "Croplands", "BuiltUp"].iter().map(|s| s.to_string()).collect();
        YearClassTotals { year, totals: ClassMap::from_values(&classes, areas.iter().copied()) }
    }

    #[test]
    fn picks_growth_decline_and_dominant() {
        let totals = vec![
            year(1995, &[10.0, 5.0, 3.0, 1.0]),
            year(2005, &[8.0, 6.0, 4.0, 1.0]),
            year(2025, &[2.0, 7.0, 3.0, 7.0]),
        ];
        let s = compute_summary(&totals).unwrap();
        assert_eq!(s.total_area, 19.0);
        assert_eq!(s.biggest_growth, ClassChange { class: "BuiltUp".into(), change: 6.0 });
        assert_eq!(s.biggest_decline, ClassChange { class: "Water".into(), change: -8.0 });
        // Trees and BuiltUp tie at 7.0; Trees comes first.
        assert_eq!(s.dominant_class, "Trees");
    }

    #[test]
    fn ties_resolve_to_first_class_in_order() {
        let totals = vec![year(1, &[1.0, 1.0, 1.0, 1.0]), year(2, &[1.0, 3.0, 3.0, 1.0])];
        let s = compute_summary(&totals).unwrap();
        assert_eq!(s.biggest_growth.class, "Trees");
        assert_eq!(s.biggest_decline.class, "Water");
        assert_eq!(s.dominant_class, "Trees");
    }

    #[test]
    fn intermediate_years_are_ignored() {
        let totals = vec![
            year(1, &[4.0, 0.0, 0.0, 0.0]),
            year(2, &[0.0, 0.0, 0.0, 4.0]),
            year(3, &[4.0, 0.0, 0.0, 0.0]),
        ];
        let s = compute_summary(&totals).unwrap();
        assert_eq!(s.biggest_growth.change, 0.0);
        assert_eq!(s.dominant_class, "Water");
    }

    #[test]
    fn rounding_happens_once() {
        // Rounding each class area before summing would report 3.00.
        let totals = vec![year(1, &[1.004, 2.004, 0.0, 0.0]), year(2, &[0.0, 3.008, 0.0, 0.0])];
        let s = compute_summary(&totals).unwrap();
        assert_eq!(s.total_area, 3.01);
        assert_eq!(s.biggest_growth.change, 1.0);
        assert_eq!(s.biggest_decline.change, -1.0);
    }

    #[test]
    fn all_zero_totals_are_well_defined() {
        let totals = vec![year(1, &[0.0; 4]), year(2, &[0.0; 4])];
        let s = compute_summary(&totals).unwrap();
        assert_eq!(s.total_area, 0.0);
        assert_eq!(s.biggest_growth.class, "Water");
        assert_eq!(s.biggest_decline.class, "Water");
        assert_eq!(s.dominant_class, "Water");
    }

    #[test]
    fn empty_input_has_no_summary() {
        assert!(compute_summary(&[]).is_none());
    }

    #[test]
    fn serialises_camel_case() {
        let totals = vec![year(1, &[1.0, 0.0, 0.0, 0.0])];
        let v = serde_json::to_value(compute_summary(&totals).unwrap()).unwrap();
        assert_eq!(v["totalArea"], 1.0);
        assert_eq!(v["biggestGrowth"]["class"], "Water");
        assert_eq!(v["dominantClass"], "Water");
    }
}
