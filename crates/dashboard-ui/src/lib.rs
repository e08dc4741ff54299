//! Terminal UI layer for the expense dashboard.
//!
//! Provides themes, header, status and ranking-bar components, currency
//! tables, trend charts, and the main application event loop built on top of
//! [`ratatui`] for browsing a [`dashboard_data::pipeline::Report`] in the
//! terminal.

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

#[cfg(test)]
mod test_support;

pub use dashboard_core as core;
