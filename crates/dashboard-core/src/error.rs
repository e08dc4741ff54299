use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the expense dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No sheet in the workbook is named after a calendar month.
    #[error("No valid monthly sheets found (e.g., January, February...)")]
    NoValidSheets,

    /// The workbook could not be opened or is not a supported format.
    #[error("Failed to open workbook {path}: {message}")]
    WorkbookOpen { path: PathBuf, message: String },

    /// A sheet listed by the workbook could not be read.
    #[error("Failed to read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
