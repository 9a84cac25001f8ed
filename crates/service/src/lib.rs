//! Vitals Service
//!
//! Core logic for concurrent metric aggregation and the auth-gated
//! dashboard refresh flow.

pub mod aggregator;
pub mod dashboard;

pub use aggregator::{AggregationStats, AggregatorService};
pub use dashboard::{DashboardError, DashboardService};
