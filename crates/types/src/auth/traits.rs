//! Core authorization trait and grant context

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::AccessError;
use crate::metrics::MetricKind;

/// Scopes a user has granted read access to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessGrant {
	/// Metric kinds the grant covers
	pub scopes: Vec<MetricKind>,
	/// When the grant was issued
	pub granted_at: DateTime<Utc>,
}

impl AccessGrant {
	pub fn new(scopes: Vec<MetricKind>) -> Self {
		Self {
			scopes,
			granted_at: Utc::now(),
		}
	}

	/// Whether the grant covers a specific metric kind
	pub fn covers(&self, kind: &MetricKind) -> bool {
		self.scopes.contains(kind)
	}
}

/// Gate that must grant access before any metric fetch runs
///
/// Wraps whatever identity and consent flow the host application uses
/// (sign-in plus a platform permission prompt in the original app). The
/// aggregation layer only depends on the outcome: a grant covering the
/// requested scopes, or a denial.
#[async_trait]
pub trait AuthGate: Send + Sync {
	/// Request read access for a set of metric kinds
	async fn request_access(&self, scopes: &[MetricKind]) -> Result<AccessGrant, AccessError>;
}
