//! Expense / investment classification.

use dashboard_core::models::{EntryType, INVESTMENT_MARKER};

/// Classify a category label.
///
/// Any label containing "investment" in any casing is an investment;
/// everything else is an expense.
///
/// ```
/// use dashboard_core::models::EntryType;
/// use dashboard_data::classifier::classify;
///
/// assert_eq!(classify("Gold Investment"), EntryType::Investment);
/// assert_eq!(classify("Rent"), EntryType::Expense);
/// ```
pub fn classify(category: &str) -> EntryType {
    if category.to_lowercase().contains(INVESTMENT_MARKER) {
        EntryType::Investment
    } else {
        EntryType::Expense
    }
}
