//! Shared domain types for the expense dashboard.
//!
//! Months, records, the category key normalizer, the error taxonomy,
//! currency formatting, and command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
