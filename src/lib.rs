//! Healthcare dashboard: record loading, filtering and per-chart aggregation.
//!
//! The library is UI-independent. The `healthcare-dashboard` binary binds it
//! to egui widgets; `dashboard-report` prints the same results as JSON.

pub mod config;
pub mod data;
