//! Land-use / land-cover change aggregation.
//!
//! Turns raw four-epoch class-transition rows into the aggregate document the
//! change-detection dashboard renders: yearly class totals, period transition
//! matrices, their flow-graph projections, and headline statistics.

pub mod aggregate;
pub mod change;
pub mod class_map;
pub mod document;
pub mod error;
pub mod records;
mod rounding;
pub mod stats;
pub mod transitions;
pub mod verify;
pub mod vocabulary;

pub use aggregate::{aggregate_year_totals, YearClassTotals};
pub use class_map::ClassMap;
pub use document::{build_document, run_pipeline, LulcDocument, PipelineOutput, RunReport};
pub use error::{Error, Result, VocabularyError};
pub use records::{parse_records, parse_row, ParsedRecords, RawRow, TransitionRecord};
pub use stats::{compute_summary, ClassChange, SummaryStatistics};
pub use transitions::{
    build_flow_graph, build_period_transitions, FlowGraph, FlowLink, FlowNode, PeriodTransition,
};
pub use verify::{verify_document, Violation};
pub use vocabulary::Vocabulary;
