//! Transition matrix builder.
//!
//! For each consecutive pair of survey years, a class×class matrix of the area
//! that moved from one class to another. Row sums equal the from-year class
//! totals, column sums the to-year totals; the diagonal is unchanged area.

pub mod sankey;

use serde::{Deserialize, Serialize};

use crate::class_map::ClassMap;
use crate::records::TransitionRecord;
use crate::vocabulary::Vocabulary;

pub use sankey::{build_flow_graph, FlowGraph, FlowLink, FlowNode, MIN_LINK_VALUE};

/// `from class → to class → area` for one period.
pub type TransitionMatrix = ClassMap<ClassMap<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTransition {
    pub from_year: i32,
    pub to_year: i32,
    pub matrix: TransitionMatrix,
}

impl PeriodTransition {
    /// Area that moved from `from` to `to`; 0 for unknown classes.
    pub fn cell(&self, from: &str, to: &str) -> f64 {
        self.matrix.get(from).map_or(0.0, |row| row.area(to))
    }

    /// Total area that was `from` at the start of the period.
    pub fn row_sum(&self, from: &str) -> f64 {
        self.matrix.get(from).map_or(0.0, ClassMap::total)
    }

    /// Total area that is `to` at the end of the period.
    pub fn column_sum(&self, to: &str) -> f64 {
        self.matrix.values().map(|row| row.area(to)).sum()
    }

    /// Area that stayed in the same class.
    pub fn unchanged(&self) -> f64 {
        self.matrix.iter().map(|(class, row)| row.area(class)).sum()
    }

    /// Largest single flow between two different classes, 0 if nothing moved.
    pub fn max_off_diagonal(&self) -> f64 {
        self.matrix
            .iter()
            .flat_map(|(from, row)| row.iter().filter(move |(to, _)| *to != from).map(|(_, &v)| v))
            .fold(0.0, f64::max)
    }
}

/// Dense accumulation for one period; converted to a `ClassMap` once filled.
fn accumulate(
    records: &[TransitionRecord],
    vocab: &Vocabulary,
    from: usize,
    to: usize,
) -> Vec<Vec<f64>> {
    let n = vocab.classes().len();
    let mut cells = vec![vec![0f64; n]; n];
    for record in records {
        let fi = record.class_at(from).and_then(|c| vocab.class_index(c));
        let ti = record.class_at(to).and_then(|c| vocab.class_index(c));
        if let (Some(fi), Some(ti)) = (fi, ti) {
            cells[fi][ti] += record.area();
        }
    }
    cells
}

/// One matrix per consecutive year pair, in chronological order.
///
/// Records naming a class outside the vocabulary at either end of a period,
/// or with no class at one of its epochs, are skipped for that period.
pub fn build_period_transitions(
    records: &[TransitionRecord],
    vocab: &Vocabulary,
) -> Vec<PeriodTransition> {
    let classes = vocab.classes();
    vocab
        .periods()
        .map(|(p, q)| {
            let cells = accumulate(records, vocab, p, q);
            let matrix = ClassMap::from_values(
                classes,
                cells.into_iter().map(|row| ClassMap::from_values(classes, row)),
            );
            PeriodTransition { from_year: vocab.years()[p], to_year: vocab.years()[q], matrix }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{parse_records, RawRow};

    fn scenario() -> Vec<PeriodTransition> {
        let rows = vec![
            RawRow::new("Water - Water - Trees - Trees", 10.0),
            RawRow::new("Trees - Trees - Trees - BuiltUp", 5.0),
        ];
        let vocab = Vocabulary::default();
        build_period_transitions(&parse_records(&rows, &vocab).records, &vocab)
    }

    #[test]
    fn one_matrix_per_consecutive_pair() {
        let periods = scenario();
        let spans: Vec<(i32, i32)> = periods.iter().map(|p| (p.from_year, p.to_year)).collect();
        assert_eq!(spans, vec![(1995, 2005), (2005, 2015), (2015, 2025)]);
        for p in &periods {
            assert_eq!(p.matrix.len(), 6);
            assert!(p.matrix.values().all(|row| row.len() == 6));
        }
    }

    #[test]
    fn first_period_is_diagonal() {
        let p = &scenario()[0];
        assert_eq!(p.cell("Water", "Water"), 10.0);
        assert_eq!(p.cell("Trees", "Trees"), 5.0);
        assert_eq!(p.cell("Water", "Trees"), 0.0);
        assert_eq!(p.unchanged(), 15.0);
        assert_eq!(p.max_off_diagonal(), 0.0);
    }

    #[test]
    fn last_period_moves_trees_to_builtup() {
        let p = &scenario()[2];
        assert_eq!(p.cell("Trees", "Trees"), 10.0);
        assert_eq!(p.cell("Trees", "BuiltUp"), 5.0);
        assert_eq!(p.row_sum("Trees"), 15.0);
        assert_eq!(p.column_sum("BuiltUp"), 5.0);
        assert_eq!(p.max_off_diagonal(), 5.0);
    }

    #[test]
    fn middle_period_changes_water_to_trees() {
        let p = &scenario()[1];
        assert_eq!(p.cell("Water", "Trees"), 10.0);
        assert_eq!(p.column_sum("Trees"), 15.0);
        assert_eq!(p.row_sum("Water"), 10.0);
    }

    #[test]
    fn unknown_class_skips_only_affected_periods() {
        let vocab = Vocabulary::default();
        let rows = vec![RawRow::new("Water - Marsh - Water - Water", 3.0)];
        let periods = build_period_transitions(&parse_records(&rows, &vocab).records, &vocab);
        assert_eq!(periods[0].row_sum("Water"), 0.0);
        assert_eq!(periods[1].column_sum("Water"), 0.0);
        assert_eq!(periods[2].cell("Water", "Water"), 3.0);
    }

    #[test]
    fn records_shorter_than_the_vocabulary_skip_missing_periods() {
        let two_epochs = Vocabulary::new(vec![1995, 2005], ["Water", "Trees"]).unwrap();
        let rows = vec![RawRow::new("Water - Trees", 2.0)];
        let recs = parse_records(&rows, &two_epochs).records;

        let periods = build_period_transitions(&recs, &Vocabulary::default());
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].cell("Water", "Trees"), 2.0);
        assert_eq!(periods[1].row_sum("Trees"), 0.0);
        assert_eq!(periods[2].unchanged(), 0.0);
    }

    #[test]
    fn matrix_json_shape() {
        let vocab = Vocabulary::new(vec![1, 2], ["A", "B"]).unwrap();
        let periods = build_period_transitions(&[], &vocab);
        let json = serde_json::to_string(&periods[0]).unwrap();
        assert_eq!(
            json,
            r#"{"fromYear":1,"toYear":2,"matrix":{"A":{"A":0.0,"B":0.0},"B":{"A":0.0,"B":0.0}}}"#
        );
    }
}
