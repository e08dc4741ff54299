//! Data pipeline for the expense dashboard.
//!
//! Responsible for selecting the month sheets of a workbook, extracting and
//! normalizing their category/amount rows, classifying them as expenses or
//! investments, aggregating the three summary views, and ordering the
//! category columns for presentation.

pub mod aggregator;
pub mod classifier;
pub mod loader;
pub mod normalizer;
pub mod ordering;
pub mod pipeline;

pub use dashboard_core as core;
