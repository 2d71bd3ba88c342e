//! Validation tool: re-check a published lulcData.json against the
//! aggregation invariants (row/column sums, conserved study area, link
//! threshold). Exits non-zero when any check fails.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lulc_core::verify::{verify_document, DEFAULT_TOLERANCE};
use lulc_core::LulcDocument;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "validate_document",
    about = "Check an aggregate LULC document for internal consistency"
)]
struct Args {
    /// Document produced by `preprocess`.
    #[arg(short, long, default_value = "src/data/lulcData.json")]
    document: PathBuf,

    /// Absolute tolerance (km²) for sum comparisons.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let doc = LulcDocument::load(&args.document)
        .with_context(|| format!("loading {}", args.document.display()))?;
    tracing::info!(
        years = doc.years.len(),
        classes = doc.classes.len(),
        periods = doc.period_transitions.len(),
        "checking document"
    );

    let violations = verify_document(&doc, args.tolerance);
    for v in &violations {
        tracing::warn!("{v}");
    }
    if !violations.is_empty() {
        bail!("{} invariant violation(s) in {}", violations.len(), args.document.display());
    }

    tracing::info!(document = %args.document.display(), "all invariants hold");
    Ok(())
}
