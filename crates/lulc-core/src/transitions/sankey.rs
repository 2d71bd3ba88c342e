//! Flow-graph (Sankey) projection of a transition matrix.
//!
//! Node layout for `n` classes:
//! ```text
//!   0 .. n      from-class nodes, "{class} ({from_year})"
//!   n .. 2n     to-class nodes,   "{class} ({to_year})"
//! ```
//! A link `from → to` has source `index(from)` and target `n + index(to)`.
//! Nodes are never pruned; only links below the negligible-flow threshold are.

use serde::{Deserialize, Serialize};

use super::PeriodTransition;
use crate::rounding::round_to;

/// Links whose 3-decimal value is at or below this are omitted.
pub const MIN_LINK_VALUE: f64 = 0.01;

const LINK_DECIMALS: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub from_class: String,
    pub to_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    pub from_year: i32,
    pub to_year: i32,
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    /// Links strictly heavier than `floor`, e.g. to declutter a small diagram.
    pub fn links_above(&self, floor: f64) -> impl Iterator<Item = &FlowLink> {
        self.links.iter().filter(move |l| l.value > floor)
    }

    pub fn link(&self, from_class: &str, to_class: &str) -> Option<&FlowLink> {
        self.links.iter().find(|l| l.from_class == from_class && l.to_class == to_class)
    }
}

/// Rounded link value for a matrix cell, or `None` when the flow is negligible.
pub(crate) fn link_value(cell: f64) -> Option<f64> {
    let value = round_to(cell, LINK_DECIMALS);
    (value > MIN_LINK_VALUE).then_some(value)
}

fn node_name(class: &str, year: i32) -> String {
    format!("{class} ({year})")
}

/// Project one period's matrix into nodes and links.
///
/// Links are emitted in matrix order: by from-class, then to-class.
pub fn build_flow_graph(period: &PeriodTransition) -> FlowGraph {
    let classes: Vec<&str> = period.matrix.keys().collect();
    let n = classes.len();

    let nodes: Vec<FlowNode> = classes
        .iter()
        .map(|c| FlowNode { name: node_name(c, period.from_year) })
        .chain(classes.iter().map(|c| FlowNode { name: node_name(c, period.to_year) }))
        .collect();

    let mut links = Vec::new();
    for (fi, (from, row)) in period.matrix.iter().enumerate() {
        for (ti, &to) in classes.iter().enumerate() {
            if let Some(value) = link_value(row.area(to)) {
                links.push(FlowLink {
                    source: fi,
                    target: n + ti,
                    value,
                    from_class: from.to_owned(),
                    to_class: to.to_owned(),
                });
            }
        }
    }

    tracing::debug!(
        from_year = period.from_year,
        to_year = period.to_year,
        links = links.len(),
        "built flow graph"
    );

    FlowGraph { from_year: period.from_year, to_year: period.to_year, nodes, links }
}
