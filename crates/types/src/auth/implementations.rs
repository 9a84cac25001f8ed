//! Ready-to-use auth gate implementations

use async_trait::async_trait;

use super::errors::AccessError;
use super::traits::{AccessGrant, AuthGate};
use crate::metrics::MetricKind;

/// Gate that grants every requested scope
///
/// Useful for development and tests where no real consent flow exists.
#[derive(Debug, Clone, Default)]
pub struct OpenGate;

#[async_trait]
impl AuthGate for OpenGate {
	async fn request_access(&self, scopes: &[MetricKind]) -> Result<AccessGrant, AccessError> {
		Ok(AccessGrant::new(scopes.to_vec()))
	}
}

/// Gate that grants only a configured set of scopes
///
/// Requests asking for any scope outside the configured set are denied
/// outright rather than partially granted, matching platform consent
/// prompts that are all-or-nothing per request.
#[derive(Debug, Clone)]
pub struct ScopedGate {
	allowed: Vec<MetricKind>,
}

impl ScopedGate {
	pub fn new(allowed: Vec<MetricKind>) -> Self {
		Self { allowed }
	}
}

#[async_trait]
impl AuthGate for ScopedGate {
	async fn request_access(&self, scopes: &[MetricKind]) -> Result<AccessGrant, AccessError> {
		for scope in scopes {
			if !self.allowed.contains(scope) {
				return Err(AccessError::Denied {
					reason: format!("scope {} was not granted", scope),
				});
			}
		}
		Ok(AccessGrant::new(scopes.to_vec()))
	}
}
