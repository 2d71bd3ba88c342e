//! Presentation rounding shared by the flow-graph and statistics stages.
//! `pub(crate)` only: callers see already-rounded values in the document.

/// Round to `decimals` places, halves toward +∞.
///
/// This is the rounding the dashboard charts were calibrated against, so a
/// value of exactly `-0.005` rounds to `0.0` rather than `-0.01`. Never
/// produces negative zero.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor + 0.5).floor() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// `part / whole × 100`, or 0 when `whole` is not positive.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}
