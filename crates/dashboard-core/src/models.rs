use serde::{Deserialize, Serialize};
use std::fmt;

/// Category key reserved for per-sheet subtotal rows.
pub const TOTAL_KEY: &str = "total";

/// Substring that marks a category as an investment.
pub const INVESTMENT_MARKER: &str = "investment";

// ── Month ──────────────────────────────────────────────────────────────────────

/// One of the twelve canonical month labels, ordered January → December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The canonical sheet label, e.g. `"January"`.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter label used on chart axes.
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Zero-based calendar position (January = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a sheet name.  Matching is exact and case-sensitive: `"january"`
    /// and `" January"` are not months.
    pub fn from_sheet_name(name: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── EntryType ──────────────────────────────────────────────────────────────────

/// Derived classification of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Expense,
    Investment,
}

impl EntryType {
    pub fn label(self) -> &'static str {
        match self {
            EntryType::Expense => "Expense",
            EntryType::Investment => "Investment",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Cells and records ──────────────────────────────────────────────────────────

/// A single spreadsheet cell, independent of the workbook backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Dates, durations and error cells, kept only as display text.
    Other(String),
}

impl CellValue {
    /// `true` for empty cells and text cells containing only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as text the way a spreadsheet user would read it.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Other(s) => s.clone(),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

/// One extracted spreadsheet row, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Cell from the category column (F).
    pub category: CellValue,
    /// Cell from the amount column (G).
    pub amount: CellValue,
    /// Month of the sheet the row came from.
    pub month: Month,
}

/// A cleaned record ready for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Trimmed category text, original casing preserved.
    pub category: String,
    /// Matching key, see [`category_key`].
    pub key: String,
    /// Parsed amount; `0.0` when the cell could not be read as a number.
    pub amount: f64,
    pub month: Month,
    pub entry_type: EntryType,
}

impl NormalizedRecord {
    /// `true` for per-sheet subtotal rows labelled "total" in any casing.
    pub fn is_total_row(&self) -> bool {
        self.key == TOTAL_KEY
    }
}

// ── Key normalization ──────────────────────────────────────────────────────────

/// Case- and whitespace-insensitive matching key for a category label.
///
/// Trims, collapses inner whitespace runs to a single space, and lowercases.
/// Used both when grouping records and when matching matrix columns against
/// the preferred column order so the two always agree.
///
/// ```
/// use dashboard_core::models::category_key;
///
/// assert_eq!(category_key("  Emergency   Fund "), "emergency fund");
/// assert_eq!(category_key("TOTAL"), "total");
/// ```
pub fn category_key(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
