//! End-to-end pipeline: workbook in, [`Report`] out.
//!
//! Load → normalize → aggregate → order columns.  Every run recomputes all
//! three views from the sheets; nothing is cached between runs.

use std::path::Path;

use chrono::Utc;
use dashboard_core::error::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::{Aggregator, CategoryRanking, MonthCategoryMatrix, MonthTypeMatrix};
use crate::loader::{load_monthly_records, SheetSource, SheetWarning, XlsxWorkbook};
use crate::normalizer::normalize_records;
use crate::ordering::order_columns;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    /// Where the workbook came from (usually its path).
    pub source: String,
    /// Month sheets whose rows were aggregated.
    pub sheets_loaded: usize,
    /// Month sheets skipped for having too few columns.
    pub sheets_skipped: usize,
    /// Rows that reached the aggregator.
    pub records_processed: usize,
    /// Amount cells that were not numbers and counted as zero.
    pub amounts_coerced: usize,
    /// Wall-clock seconds spent reading sheets.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent normalizing and aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Month × category sums, columns in presentation order.
    pub category_matrix: MonthCategoryMatrix,
    /// Month × type sums with the per-month total.
    pub type_matrix: MonthTypeMatrix,
    /// Full-year category sums, ascending.
    pub ranking: CategoryRanking,
    /// Sheets skipped while loading.
    pub warnings: Vec<SheetWarning>,
    pub metadata: ReportMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the pipeline over any [`SheetSource`].
///
/// Fails only when the workbook has no month sheets or a sheet cannot be
/// read; in both cases nothing is aggregated.
pub fn build_report<S: SheetSource + ?Sized>(source: &mut S, source_label: &str) -> Result<Report> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let loaded = load_monthly_records(source)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Normalize ─────────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let normalized = normalize_records(&loaded.records);
    if normalized.amounts_coerced > 0 {
        debug!(
            "{} amount cells were not numeric and count as zero",
            normalized.amounts_coerced
        );
    }

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let raw_matrix = Aggregator::by_month_category(&normalized.records);
    let type_matrix = Aggregator::by_month_type(&normalized.records);
    let ranking = Aggregator::category_ranking(&normalized.records);

    // ── Step 4: Presentation order ────────────────────────────────────────────
    let category_matrix = raw_matrix.reorder_columns(&order_columns(raw_matrix.columns()));
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    info!(
        "Aggregated {} records from {} sheets ({} skipped) into {} categories",
        normalized.records.len(),
        loaded.sheets_loaded.len(),
        loaded.warnings.len(),
        category_matrix.columns().len()
    );

    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: source_label.to_string(),
        sheets_loaded: loaded.sheets_loaded.len(),
        sheets_skipped: loaded.warnings.len(),
        records_processed: normalized.records.len(),
        amounts_coerced: normalized.amounts_coerced,
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(Report {
        category_matrix,
        type_matrix,
        ranking,
        warnings: loaded.warnings,
        metadata,
    })
}

/// Open the workbook at `path` and run the pipeline over it.
pub fn analyze_workbook(path: &Path) -> Result<Report> {
    let mut workbook = XlsxWorkbook::open(path)?;
    build_report(&mut workbook, &path.display().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
