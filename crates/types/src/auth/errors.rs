//! Error types for authorization

use thiserror::Error;

/// Failure to obtain a data-access grant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
	#[error("access denied: {reason}")]
	Denied { reason: String },

	#[error("health data platform unavailable: {detail}")]
	Unavailable { detail: String },
}
