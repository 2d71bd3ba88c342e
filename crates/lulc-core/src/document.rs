//! Pipeline orchestrator and the published aggregate document.
//!
//! Parse → aggregate → period matrices → flow graphs → summary, run once over
//! an in-memory row list. The document is the only contract with the
//! dashboard: consumers read it and never recompute aggregates.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_year_totals, YearClassTotals};
use crate::error::{Error, Result};
use crate::records::{parse_records, RawRow};
use crate::stats::{compute_summary, SummaryStatistics};
use crate::transitions::{build_flow_graph, build_period_transitions, FlowGraph, PeriodTransition};
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LulcDocument {
    pub years: Vec<i32>,
    pub classes: Vec<String>,
    pub year_class_totals: Vec<YearClassTotals>,
    pub period_transitions: Vec<PeriodTransition>,
    pub sankey_data: Vec<FlowGraph>,
    pub stats: SummaryStatistics,
}

/// Row-level diagnostics from one run. Not part of the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub accepted: usize,
    pub rejected: usize,
}

pub struct PipelineOutput {
    pub document: LulcDocument,
    pub report: RunReport,
}

/// Run every stage over `rows` and report how many rows were accepted.
pub fn run_pipeline(rows: &[RawRow], vocab: &Vocabulary) -> PipelineOutput {
    let parsed = parse_records(rows, vocab);
    let report = RunReport { accepted: parsed.accepted(), rejected: parsed.rejected };

    let year_class_totals = aggregate_year_totals(&parsed.records, vocab);
    let period_transitions = build_period_transitions(&parsed.records, vocab);
    let sankey_data = period_transitions.iter().map(build_flow_graph).collect();
    // A validated vocabulary always has a first year and a first class.
    let stats = compute_summary(&year_class_totals).unwrap_or_default();

    let document = LulcDocument {
        years: vocab.years().to_vec(),
        classes: vocab.classes().to_vec(),
        year_class_totals,
        period_transitions,
        sankey_data,
        stats,
    };
    PipelineOutput { document, report }
}

pub fn build_document(rows: &[RawRow], vocab: &Vocabulary) -> LulcDocument {
    run_pipeline(rows, vocab).document
}

impl LulcDocument {
    /// Pretty JSON; identical input always yields identical bytes.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io("reading", path, e))?;
        Self::from_json(&json)
    }

    /// Replace the document at `path` atomically.
    ///
    /// Writes a sibling `*.tmp` file and renames it over the target, so
    /// readers see either the previous document or the new one in full.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Error::io("creating directory", dir, e))?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = Path::new(&tmp);

        fs::write(tmp, json).map_err(|e| Error::io("writing", tmp, e))?;
        fs::rename(tmp, path).map_err(|e| Error::io("replacing", path, e))?;
        tracing::debug!(path = %path.display(), "document written");
        Ok(())
    }

    pub fn totals_for_year(&self, year: i32) -> Option<&YearClassTotals> {
        crate::aggregate::totals_for_year(&self.year_class_totals, year)
    }
}
