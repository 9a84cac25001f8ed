//! Error types for metric fetching and aggregation setup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-source fetch failure
///
/// Captured as data inside the snapshot rather than propagated as
/// control flow: one source failing never aborts its siblings. Terminal
/// per attempt; carries no retry state.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FetchError {
	#[error("access to {metric} has not been granted")]
	Unauthorized { metric: String },

	#[error("no data recorded for {metric} in the requested range")]
	NoData { metric: String },

	#[error("fetch did not settle within {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("platform store error: {detail}")]
	Platform { detail: String },
}

/// Malformed aggregation setup, rejected before any fetch starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
	#[error("duplicate source name: {name}")]
	DuplicateSourceName { name: String },

	#[error("invalid date range: start {start} is after end {end}")]
	InvalidDateRange {
		start: DateTime<Utc>,
		end: DateTime<Utc>,
	},
}
