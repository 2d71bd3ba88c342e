//! Converts the change-detection transition rows into the dashboard's
//! aggregate document (lulcData.json).
//!
//! Input is the spreadsheet exported as a JSON array of rows, each row an
//! array `[label, area, ...]`. The first row is the sheet header and is
//! skipped unless `--keep-first-row` is given.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lulc_core::change::period_changes;
use lulc_core::{run_pipeline, LulcDocument, RawRow, Vocabulary};
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "preprocess",
    about = "Aggregate LULC transition rows into the dashboard data document"
)]
struct Args {
    /// JSON array of spreadsheet rows.
    #[arg(short, long)]
    input: PathBuf,

    /// Output document path; replaced atomically.
    #[arg(short, long, default_value = "src/data/lulcData.json")]
    output: PathBuf,

    /// Vocabulary JSON `{"years": [...], "classes": [...]}`. Defaults to the
    /// 1995–2025 six-class reference vocabulary.
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Treat the first row as data rather than a header.
    #[arg(long)]
    keep_first_row: bool,
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn read_rows(path: &Path, keep_first_row: bool) -> Result<Vec<RawRow>> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading rows {}", path.display()))?;
    let mut rows: Vec<RawRow> =
        serde_json::from_str(&json).with_context(|| format!("parsing rows {}", path.display()))?;
    if !keep_first_row && !rows.is_empty() {
        rows.remove(0);
    }
    Ok(rows)
}

fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    match path {
        Some(p) => {
            Vocabulary::load(p).with_context(|| format!("loading vocabulary {}", p.display()))
        }
        None => Ok(Vocabulary::default()),
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

fn print_change_table(doc: &LulcDocument) {
    for period in &doc.period_transitions {
        let totals = &doc.year_class_totals;
        let Some(rows) = period_changes(totals, period.from_year, period.to_year) else {
            continue;
        };
        eprintln!("\n{} -> {}", period.from_year, period.to_year);
        eprintln!("{:<14} {:>10} {:>10} {:>10} {:>8}", "Class", "Before", "After", "Change", "Pct");
        eprintln!("{}", "-".repeat(56));
        for r in rows {
            eprintln!(
                "{:<14} {:>10.1} {:>10.1} {:>+10.1} {:>+7.1}%",
                r.class, r.before, r.after, r.change, r.pct_change
            );
        }
        let moved = period.matrix.values().map(|row| row.total()).sum::<f64>() - period.unchanged();
        eprintln!(
            "changed class: {:.1} km² (largest single flow {:.1} km²)",
            moved,
            period.max_off_diagonal()
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let vocab = load_vocabulary(args.vocabulary.as_deref())?;
    let rows = read_rows(&args.input, args.keep_first_row)?;
    tracing::info!(rows = rows.len(), input = %args.input.display(), "read transition rows");

    let out = run_pipeline(&rows, &vocab);
    tracing::info!(
        accepted = out.report.accepted,
        rejected = out.report.rejected,
        "parsed transitions"
    );
    if out.report.accepted == 0 {
        tracing::warn!("no transition rows accepted; writing an all-zero document");
    }

    out.document
        .write_atomic(&args.output)
        .with_context(|| format!("publishing {}", args.output.display()))?;
    tracing::info!(output = %args.output.display(), "data written");

    let stats = &out.document.stats;
    tracing::info!(
        total_area = stats.total_area,
        biggest_growth = %stats.biggest_growth.class,
        growth = stats.biggest_growth.change,
        biggest_decline = %stats.biggest_decline.class,
        decline = stats.biggest_decline.change,
        dominant = %stats.dominant_class,
        "summary"
    );
    print_change_table(&out.document);

    Ok(())
}
