//! Sample-series metric source

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use vitals_types::{DateRange, FetchResult, MetricKind, MetricSource, MetricValue};

use crate::scalar_sum::map_store_error;
use crate::store::HealthStore;

/// Source for metrics reported as timestamped samples
///
/// Heart rate takes this shape. Samples come back ordered by timestamp;
/// a range with nothing recorded yields an empty series, not an error.
#[derive(Debug, Clone)]
pub struct SampleSeriesSource {
	kind: MetricKind,
	store: Arc<dyn HealthStore>,
}

impl SampleSeriesSource {
	pub fn new(kind: MetricKind, store: Arc<dyn HealthStore>) -> Self {
		Self { kind, store }
	}
}

#[async_trait]
impl MetricSource for SampleSeriesSource {
	fn kind(&self) -> MetricKind {
		self.kind.clone()
	}

	async fn fetch(&self, range: &DateRange) -> FetchResult<MetricValue> {
		let samples = self
			.store
			.samples(&self.kind, range)
			.await
			.map_err(|e| map_store_error(&self.kind, e))?;

		if samples.is_empty() {
			debug!(metric = %self.kind, %range, "no samples in range, reporting empty series");
		}

		Ok(MetricValue::SampleSeries(samples))
	}
}
