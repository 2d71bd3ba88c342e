//! Record parser: raw spreadsheet rows → typed transition records.
//!
//! A raw row is whatever the tabular export produced: the first cell should be
//! a label such as `"Water - Trees - BuiltUp - Croplands"` (one class per
//! survey epoch) and the second an area in km². Header rows, blank lines and
//! anything else that does not fit are dropped without an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::vocabulary::Vocabulary;

/// Separator between per-epoch class names in a transition label.
pub const LABEL_DELIMITER: &str = " - ";

/// One tabular row before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// `None` when the label cell was missing or not a string.
    pub label: Option<String>,
    /// `None` when the area cell was missing or not a number.
    pub area: Option<f64>,
}

impl RawRow {
    pub fn new(label: impl Into<String>, area: f64) -> Self {
        Self { label: Some(label.into()), area: Some(area) }
    }

    /// Row from positional cells `[label, area, ...]`; extra cells are ignored.
    pub fn from_cells(cells: &[Value]) -> Self {
        Self {
            label: cells.first().and_then(Value::as_str).map(str::to_owned),
            area: cells.get(1).and_then(number_cell),
        }
    }

    /// Accepts a positional array or an object with `label` / `area` keys.
    /// Any other shape yields an empty row, which the parser rejects.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(cells) => Self::from_cells(cells),
            Value::Object(obj) => Self {
                label: obj.get("label").and_then(Value::as_str).map(str::to_owned),
                area: obj.get("area").and_then(number_cell),
            },
            _ => Self::default(),
        }
    }
}

fn number_cell(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for RawRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RawRow::from_value(&value))
    }
}

/// One parcel's class at every survey epoch, plus its area.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRecord {
    class_sequence: Vec<String>,
    area: f64,
}

impl TransitionRecord {
    pub fn class_sequence(&self) -> &[String] {
        &self.class_sequence
    }

    /// Class at epoch index `epoch`, `None` past the end of the sequence.
    pub fn class_at(&self, epoch: usize) -> Option<&str> {
        self.class_sequence.get(epoch).map(String::as_str)
    }

    pub fn area(&self) -> f64 {
        self.area
    }
}

/// Accepted records in input order, plus how many rows were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub records: Vec<TransitionRecord>,
    pub rejected: usize,
}

impl ParsedRecords {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }
}

/// Validate a single row against the expected number of epochs.
///
/// Well-formed iff the label splits on `" - "` into exactly `epochs` trimmed,
/// non-empty components and the area is finite and positive. Class names are
/// not checked against the vocabulary here; unknown classes are skipped by
/// the aggregation stages.
pub fn parse_row(row: &RawRow, epochs: usize) -> Option<TransitionRecord> {
    let label = row.label.as_deref()?;
    let area = row.area?;
    if !area.is_finite() || area <= 0.0 {
        return None;
    }

    let class_sequence: Vec<String> =
        label.split(LABEL_DELIMITER).map(|s| s.trim().to_owned()).collect();
    if class_sequence.len() != epochs || class_sequence.iter().any(String::is_empty) {
        return None;
    }

    Some(TransitionRecord { class_sequence, area })
}

/// Parse every row, keeping the well-formed ones in order.
pub fn parse_records(rows: &[RawRow], vocab: &Vocabulary) -> ParsedRecords {
    let records: Vec<TransitionRecord> =
        rows.iter().filter_map(|row| parse_row(row, vocab.epochs())).collect();
    let rejected = rows.len() - records.len();
    tracing::debug!(accepted = records.len(), rejected, "parsed transition rows");
    ParsedRecords { records, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_row() {
        let r = parse_row(&RawRow::new("Water - Trees - BuiltUp - Croplands", 12.5), 4).unwrap();
        assert_eq!(r.class_sequence(), &["Water", "Trees", "BuiltUp", "Croplands"]);
        assert_eq!(r.class_at(2), Some("BuiltUp"));
        assert_eq!(r.class_at(4), None);
        assert_eq!(r.area(), 12.5);
    }

    #[test]
    fn trims_components() {
        let r = parse_row(&RawRow::new("  Water -  Trees  - Trees - Trees ", 1.0), 4).unwrap();
        assert_eq!(r.class_sequence(), &["Water", "Trees", "Trees", "Trees"]);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(parse_row(&RawRow::new("Water - Trees - BuiltUp", 1.0), 4).is_none());
        let five = RawRow::new("Water - Trees - BuiltUp - Water - Trees", 1.0);
        assert!(parse_row(&five, 4).is_none());
        // Hyphen without surrounding spaces is not the delimiter.
        assert!(parse_row(&RawRow::new("Water-Trees-BuiltUp-Water", 1.0), 4).is_none());
    }

    #[test]
    fn rejects_empty_label_and_components() {
        assert!(parse_row(&RawRow::new("", 1.0), 4).is_none());
        assert!(parse_row(&RawRow::new("Water -  - Trees - Trees", 1.0), 4).is_none());
    }

    #[test]
    fn rejects_non_positive_or_non_finite_area() {
        let label = "Water - Water - Water - Water";
        assert!(parse_row(&RawRow::new(label, 0.0), 4).is_none());
        assert!(parse_row(&RawRow::new(label, -3.0), 4).is_none());
        assert!(parse_row(&RawRow::new(label, f64::NAN), 4).is_none());
        assert!(parse_row(&RawRow::new(label, f64::INFINITY), 4).is_none());
    }

    #[test]
    fn cells_of_wrong_type_are_missing() {
        let header = RawRow::from_cells(&[json!("Transition"), json!("Area (km2)")]);
        assert_eq!(header.label.as_deref(), Some("Transition"));
        assert_eq!(header.area, None);

        let numeric_label = RawRow::from_cells(&[json!(42), json!(1.0)]);
        assert_eq!(numeric_label.label, None);

        let blank = RawRow::from_cells(&[]);
        assert_eq!(blank, RawRow::default());
    }

    #[test]
    fn deserialises_arrays_objects_and_junk() {
        let rows: Vec<RawRow> = serde_json::from_value(json!([
            ["Water - Trees - Trees - Trees", 2.0, "ignored"],
            {"label": "Trees - Trees - Trees - Trees", "area": 3},
            null,
            "stray"
        ]))
        .unwrap();
        assert_eq!(rows[0], RawRow::new("Water - Trees - Trees - Trees", 2.0));
        assert_eq!(rows[1], RawRow::new("Trees - Trees - Trees - Trees", 3.0));
        assert_eq!(rows[2], RawRow::default());
        assert_eq!(rows[3], RawRow::default());
    }

    #[test]
    fn parse_records_preserves_order_and_counts_rejects() {
        let rows = vec![
            RawRow::from_cells(&[json!("Transition"), json!("Area")]),
            RawRow::new("Trees - Trees - Trees - BuiltUp", 5.0),
            RawRow::default(),
            RawRow::new("Water - Water - Trees - Trees", 10.0),
            RawRow { label: Some("Water - Water - Water - Water".into()), area: None },
        ];
        let parsed = parse_records(&rows, &Vocabulary::default());
        assert_eq!(parsed.accepted(), 2);
        assert_eq!(parsed.rejected, 3);
        assert_eq!(parsed.records[0].area(), 5.0);
        assert_eq!(parsed.records[1].area(), 10.0);
    }
}
