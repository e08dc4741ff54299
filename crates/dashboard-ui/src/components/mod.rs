//! Reusable line-level widgets shared by the dashboard views.

pub mod header;
pub mod ranking_bar;
pub mod status;
