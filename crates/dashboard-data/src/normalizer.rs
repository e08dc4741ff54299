//! Record normalization.
//!
//! Turns [`RawRecord`]s into [`NormalizedRecord`]s.  Normalization is total:
//! a cell that cannot be read as a number silently becomes `0.0`.

use dashboard_core::models::{category_key, CellValue, NormalizedRecord, RawRecord};

use crate::classifier::classify;

/// Normalized records plus a count of amount cells that were coerced to zero.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub records: Vec<NormalizedRecord>,
    pub amounts_coerced: usize,
}

/// Read an amount cell as a finite number.
///
/// Booleans read as 1 and 0.  Returns `None` for empty, date and error
/// cells, for text that does not parse as a float, and for non-finite values.
pub fn parse_amount(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Bool(b) => f64::from(u8::from(*b)),
        CellValue::Empty | CellValue::Other(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Trimmed display text of a category cell.
pub fn category_text(cell: &CellValue) -> String {
    cell.as_text().trim().to_string()
}

/// Normalize a single record.
pub fn normalize_record(raw: &RawRecord) -> NormalizedRecord {
    let category = category_text(&raw.category);
    let key = category_key(&category);
    let entry_type = classify(&key);
    NormalizedRecord {
        category,
        key,
        amount: parse_amount(&raw.amount).unwrap_or(0.0),
        month: raw.month,
        entry_type,
    }
}

/// Normalize every record, preserving order.
pub fn normalize_records(raws: &[RawRecord]) -> NormalizeOutcome {
    let amounts_coerced = raws
        .iter()
        .filter(|r| parse_amount(&r.amount).is_none())
        .count();
    NormalizeOutcome {
        records: raws.iter().map(normalize_record).collect(),
        amounts_coerced,
    }
}
