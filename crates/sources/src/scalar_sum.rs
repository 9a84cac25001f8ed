//! Scalar-sum metric source

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use vitals_types::{DateRange, FetchError, FetchResult, MetricKind, MetricSource, MetricValue};

use crate::store::{HealthStore, StoreError};

/// Source for metrics reported as a single sum over the range
///
/// Steps and distance take this shape. The store aggregates in its
/// recording unit; `unit_scale` converts to the reporting unit (distance
/// is recorded in meters and reported in kilometers). A range with
/// nothing recorded yields `Scalar(0.0)` rather than an error.
#[derive(Debug, Clone)]
pub struct CumulativeSumSource {
	kind: MetricKind,
	store: Arc<dyn HealthStore>,
	unit_scale: f64,
}

impl CumulativeSumSource {
	pub fn new(kind: MetricKind, store: Arc<dyn HealthStore>) -> Self {
		Self::with_unit_scale(kind, store, 1.0)
	}

	pub fn with_unit_scale(kind: MetricKind, store: Arc<dyn HealthStore>, unit_scale: f64) -> Self {
		Self {
			kind,
			store,
			unit_scale,
		}
	}
}

#[async_trait]
impl MetricSource for CumulativeSumSource {
	fn kind(&self) -> MetricKind {
		self.kind.clone()
	}

	async fn fetch(&self, range: &DateRange) -> FetchResult<MetricValue> {
		let sum = self
			.store
			.cumulative_sum(&self.kind, range)
			.await
			.map_err(|e| map_store_error(&self.kind, e))?;

		let total = match sum {
			Some(total) => total * self.unit_scale,
			None => {
				debug!(metric = %self.kind, %range, "no records in range, reporting zero");
				0.0
			},
		};

		Ok(MetricValue::Scalar(total))
	}
}

/// Map a store failure into the per-source fetch error taxonomy
pub(crate) fn map_store_error(kind: &MetricKind, error: StoreError) -> FetchError {
	match error {
		StoreError::Unavailable => FetchError::Platform {
			detail: "health data store is unavailable".to_string(),
		},
		StoreError::Unauthorized { kind: _ } => FetchError::Unauthorized {
			metric: kind.to_string(),
		},
		StoreError::Query { detail } => FetchError::Platform { detail },
	}
}
