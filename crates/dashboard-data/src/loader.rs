//! Workbook sheet selection and column extraction.
//!
//! Picks the sheets named after calendar months, extracts the category
//! (column F) and amount (column G) cells from each, and tags every row with
//! its month.  Sheets too narrow to hold both columns are skipped with a
//! [`SheetWarning`].

use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader, Sheets};
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{CellValue, Month, RawRecord};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Zero-based index of the category column (F).
pub const CATEGORY_COLUMN: usize = 5;
/// Zero-based index of the amount column (G).
pub const AMOUNT_COLUMN: usize = 6;
/// A sheet needs at least this many columns to hold both fields.
pub const MIN_COLUMNS: usize = AMOUNT_COLUMN + 1;

// ── SheetGrid ─────────────────────────────────────────────────────────────────

/// The used rows of one sheet, with cells at their absolute column positions.
///
/// Row 0 is the first used row of the sheet (its header row).  Column 5 is
/// always column F, even when the columns to its left are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<CellValue>>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl SheetGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Number of columns, i.e. the position of the right-most used cell + 1.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.iter().rposition(|c| *c != CellValue::Empty))
            .map(|last| last + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

// ── SheetSource ───────────────────────────────────────────────────────────────

/// A workbook that can list its sheets and hand out their cells.
pub trait SheetSource {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet by name.
    fn read_sheet(&mut self, name: &str) -> Result<SheetGrid>;
}

/// A spreadsheet file on disk (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
pub struct XlsxWorkbook {
    sheets: Sheets<std::io::BufReader<std::fs::File>>,
}

impl XlsxWorkbook {
    /// Open the workbook at `path`, detecting the format from its extension.
    pub fn open(path: &Path) -> Result<Self> {
        let sheets = open_workbook_auto(path).map_err(|e| DashboardError::WorkbookOpen {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("Opened workbook {}", path.display());
        Ok(Self { sheets })
    }
}

impl SheetSource for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<SheetGrid> {
        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| DashboardError::SheetRead {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(grid_from_range(&range))
    }
}

/// Sheets held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, SheetGrid)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet; a sheet with the same name is replaced in place.
    pub fn with_sheet(mut self, name: impl Into<String>, grid: SheetGrid) -> Self {
        let name = name.into();
        match self.sheets.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = grid,
            None => self.sheets.push((name, grid)),
        }
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<SheetGrid> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| DashboardError::SheetRead {
                sheet: name.to_string(),
                message: "no such sheet".to_string(),
            })
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Non-fatal problems found while loading.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SheetWarning {
    #[error("Sheet '{sheet}' does not have enough columns ({columns} < 7). Skipping.")]
    InsufficientColumns { sheet: String, columns: usize },
}

/// Everything the loader extracted from a workbook.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Extracted rows, sheet by sheet in workbook order.
    pub records: Vec<RawRecord>,
    /// Sheets that were skipped, with the reason.
    pub warnings: Vec<SheetWarning>,
    /// Month sheets whose rows were extracted.
    pub sheets_loaded: Vec<Month>,
}

/// Names from `sheet_names` that are exactly a canonical month, in input order.
pub fn select_month_sheets(sheet_names: &[String]) -> Vec<(String, Month)> {
    sheet_names
        .iter()
        .filter_map(|name| Month::from_sheet_name(name).map(|m| (name.clone(), m)))
        .collect()
}

/// Extract the category/amount rows of every month sheet in `source`.
///
/// Fails with [`DashboardError::NoValidSheets`] when no sheet is named after
/// a month.  Sheets narrower than [`MIN_COLUMNS`] are skipped and reported in
/// [`LoadOutcome::warnings`].
pub fn load_monthly_records<S: SheetSource + ?Sized>(source: &mut S) -> Result<LoadOutcome> {
    let names = source.sheet_names();
    let month_sheets = select_month_sheets(&names);

    if month_sheets.is_empty() {
        warn!("No month sheets among {:?}", names);
        return Err(DashboardError::NoValidSheets);
    }

    let mut outcome = LoadOutcome::default();

    for (name, month) in month_sheets {
        let grid = source.read_sheet(&name)?;
        let columns = grid.width();

        if columns < MIN_COLUMNS {
            let warning = SheetWarning::InsufficientColumns {
                sheet: name.clone(),
                columns,
            };
            warn!("{}", warning);
            outcome.warnings.push(warning);
            continue;
        }

        let before = outcome.records.len();
        outcome.records.extend(extract_rows(&grid, month));
        debug!(
            "Sheet {}: {} rows extracted",
            name,
            outcome.records.len() - before
        );
        outcome.sheets_loaded.push(month);
    }

    Ok(outcome)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Rows below the header whose category or amount cell holds something.
fn extract_rows(grid: &SheetGrid, month: Month) -> Vec<RawRecord> {
    (1..grid.height())
        .filter_map(|row| {
            let category = grid.cell(row, CATEGORY_COLUMN);
            let amount = grid.cell(row, AMOUNT_COLUMN);
            if category.is_blank() && amount.is_blank() {
                return None;
            }
            Some(RawRecord {
                category: category.clone(),
                amount: amount.clone(),
                month,
            })
        })
        .collect()
}

/// Convert a calamine range into a grid whose column 0 is column A.
///
/// The range starts at the first used cell, so each row is padded back to
/// column A with empty cells.
fn grid_from_range(range: &Range<Data>) -> SheetGrid {
    let first_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let rows = range
        .rows()
        .map(|row| {
            std::iter::repeat_n(CellValue::Empty, first_col)
                .chain(row.iter().map(cell_from_data))
                .collect()
        })
        .collect();
    SheetGrid::new(rows)
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Other(excel_datetime_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Other(s.clone()),
        Data::Error(e) => CellValue::Other(e.to_string()),
    }
}

/// `YYYY-MM-DD HH:MM:SS` for dates; durations and out-of-range serials keep
/// their raw serial value.
fn excel_datetime_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime().filter(|_| dt.is_datetime()) {
        Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
