//! Temporal aggregator: per survey year, total area occupied by each class.

use serde::{Deserialize, Serialize};

use crate::class_map::ClassMap;
use crate::records::TransitionRecord;
use crate::vocabulary::Vocabulary;

/// Class areas (km²) for one survey year.
///
/// Serialises flat, as `{"year": 1995, "Water": 10.0, "Trees": 5.0, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearClassTotals {
    pub year: i32,
    #[serde(flatten)]
    pub totals: ClassMap<f64>,
}

impl YearClassTotals {
    pub fn area(&self, class: &str) -> f64 {
        self.totals.area(class)
    }

    /// Study area: sum over all classes.
    pub fn total(&self) -> f64 {
        self.totals.total()
    }
}

/// One entry per vocabulary year, in year order, with every class present.
///
/// A record whose class at some epoch is not in the vocabulary, or whose
/// sequence is shorter than the vocabulary's years, contributes nothing to
/// that epoch's bucket.
pub fn aggregate_year_totals(
    records: &[TransitionRecord],
    vocab: &Vocabulary,
) -> Vec<YearClassTotals> {
    let n_classes = vocab.classes().len();

    vocab
        .years()
        .iter()
        .enumerate()
        .map(|(epoch, &year)| {
            let mut sums = vec![0f64; n_classes];
            for record in records {
                if let Some(ci) = record.class_at(epoch).and_then(|c| vocab.class_index(c)) {
                    sums[ci] += record.area();
                }
            }
            YearClassTotals { year, totals: ClassMap::from_values(vocab.classes(), sums) }
        })
        .collect()
}

/// Totals for `year`, if it is one of the aggregated years.
pub fn totals_for_year(totals: &[YearClassTotals], year: i32) -> Option<&YearClassTotals> {
    totals.iter().find(|t| t.year == year)
}
