//! Structural invariant checks for a published document.
//!
//! - Row sums of every period matrix equal the from-year class totals.
//! - Column sums equal the to-year class totals.
//! - The study area is the same in every year.
//! - Each flow-graph link agrees with its matrix cell, and every cell above
//!   the negligible-flow threshold has a link.

use thiserror::Error;

use crate::aggregate::totals_for_year;
use crate::document::LulcDocument;
use crate::transitions::sankey::link_value;
use crate::transitions::PeriodTransition;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error(
        "{from_year}->{to_year}: row {class} sums to {actual}, {from_year} total is {expected}"
    )]
    RowSum { from_year: i32, to_year: i32, class: String, expected: f64, actual: f64 },

    #[error(
        "{from_year}->{to_year}: column {class} sums to {actual}, {to_year} total is {expected}"
    )]
    ColumnSum { from_year: i32, to_year: i32, class: String, expected: f64, actual: f64 },

    #[error("{year}: study area {actual} differs from first-year area {expected}")]
    Conservation { year: i32, expected: f64, actual: f64 },

    #[error("{from_year}->{to_year}: year {year} has no class totals")]
    MissingYear { from_year: i32, to_year: i32, year: i32 },

    #[error(
        "{from_year}->{to_year}: link {from_class}->{to_class} is {actual:?}, expected {expected:?}"
    )]
    Link {
        from_year: i32,
        to_year: i32,
        from_class: String,
        to_class: String,
        expected: Option<f64>,
        actual: Option<f64>,
    },

    #[error("{0}")]
    Shape(String),
}

fn check_sums(
    doc: &LulcDocument,
    period: &PeriodTransition,
    tolerance: f64,
    out: &mut Vec<Violation>,
) {
    let (from_year, to_year) = (period.from_year, period.to_year);
    let from = totals_for_year(&doc.year_class_totals, from_year);
    let to = totals_for_year(&doc.year_class_totals, to_year);

    for (year, totals) in [(from_year, from), (to_year, to)] {
        if totals.is_none() {
            out.push(Violation::MissingYear { from_year, to_year, year });
        }
    }

    for class in &doc.classes {
        if let Some(from) = from {
            let (expected, actual) = (from.area(class), period.row_sum(class));
            if (expected - actual).abs() > tolerance {
                let class = class.clone();
                out.push(Violation::RowSum { from_year, to_year, class, expected, actual });
            }
        }
        if let Some(to) = to {
            let (expected, actual) = (to.area(class), period.column_sum(class));
            if (expected - actual).abs() > tolerance {
                let class = class.clone();
                out.push(Violation::ColumnSum { from_year, to_year, class, expected, actual });
            }
        }
    }
}

fn check_links(doc: &LulcDocument, period: &PeriodTransition, out: &mut Vec<Violation>) {
    let graph = doc
        .sankey_data
        .iter()
        .find(|g| g.from_year == period.from_year && g.to_year == period.to_year);
    let Some(graph) = graph else {
        out.push(Violation::Shape(format!(
            "{}->{}: no flow graph for period",
            period.from_year, period.to_year
        )));
        return;
    };

    let n = doc.classes.len();
    if graph.nodes.len() != 2 * n {
        out.push(Violation::Shape(format!(
            "{}->{}: {} flow nodes, expected {}",
            graph.from_year,
            graph.to_year,
            graph.nodes.len(),
            2 * n
        )));
    }

    for (fi, from) in doc.classes.iter().enumerate() {
        for (ti, to) in doc.classes.iter().enumerate() {
            let expected = link_value(period.cell(from, to));
            let link = graph.link(from, to);
            let actual = link.map(|l| l.value);
            let misplaced = link.is_some_and(|l| l.source != fi || l.target != n + ti);
            if expected != actual || misplaced {
                out.push(Violation::Link {
                    from_year: period.from_year,
                    to_year: period.to_year,
                    from_class: from.clone(),
                    to_class: to.clone(),
                    expected,
                    actual,
                });
            }
        }
    }
}

/// Every invariant violation found in `doc`; empty when the document is sound.
pub fn verify_document(doc: &LulcDocument, tolerance: f64) -> Vec<Violation> {
    let mut out = Vec::new();

    if doc.year_class_totals.len() != doc.years.len() {
        out.push(Violation::Shape(format!(
            "{} yearly totals for {} years",
            doc.year_class_totals.len(),
            doc.years.len()
        )));
    }
    let expected_periods = doc.years.len().saturating_sub(1);
    if doc.period_transitions.len() != expected_periods {
        out.push(Violation::Shape(format!(
            "{} period matrices, expected {expected_periods}",
            doc.period_transitions.len()
        )));
    }

    if let Some(first) = doc.year_class_totals.first() {
        let expected = first.total();
        for t in &doc.year_class_totals[1..] {
            let actual = t.total();
            if (expected - actual).abs() > tolerance {
                out.push(Violation::Conservation { year: t.year, expected, actual });
            }
        }
    }

    for period in &doc.period_transitions {
        check_sums(doc, period, tolerance, &mut out);
        check_links(doc, period, &mut out);
    }

    out
}
