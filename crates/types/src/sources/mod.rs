//! Core metric source trait for provider implementations

use std::fmt::Debug;

use async_trait::async_trait;

use crate::metrics::{DateRange, FetchResult, MetricKind, MetricValue};

/// A single async provider for one named metric
///
/// Implementations read from whatever backs them (platform health store,
/// remote API, fixture data) and settle exactly once per call. Sources
/// normalize "nothing recorded" to `Scalar(0.0)` or an empty series
/// rather than failing, so aggregation stays deterministic when a range
/// simply has no data. Retry policy does not live here: each source is
/// attempted once per cycle.
#[async_trait]
pub trait MetricSource: Send + Sync + Debug {
	/// Kind of metric this source provides, also its auth scope
	fn kind(&self) -> MetricKind;

	/// Fetch the metric value for a half-open date range
	///
	/// The returned value's shape matches the source's kind: scalar-sum
	/// sources yield `Scalar`, sampled sources yield `SampleSeries`
	/// ordered by timestamp.
	async fn fetch(&self, range: &DateRange) -> FetchResult<MetricValue>;
}
