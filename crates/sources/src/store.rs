//! Health record store seam and in-memory implementation

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use vitals_types::{DateRange, MetricKind, Sample};

/// Errors surfaced by a health record store
///
/// An entirely unavailable store is an explicit error here, never a
/// silent no-op: sources map it to a platform fetch error so the
/// snapshot shows what happened.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
	#[error("health data store is unavailable")]
	Unavailable,

	#[error("read access to {kind} has not been authorized")]
	Unauthorized { kind: MetricKind },

	#[error("store query failed: {detail}")]
	Query { detail: String },
}

/// Read-only view over a health record store
///
/// The seam concrete sources fetch through. Mirrors the two query
/// shapes the underlying platform offers: an aggregated cumulative sum
/// and a raw sample listing, both scoped to a half-open date range.
#[async_trait]
pub trait HealthStore: Send + Sync + Debug {
	/// Sum of all sample values for `kind` within `range`
	///
	/// `Ok(None)` means nothing was recorded in the range, which is not
	/// an error.
	async fn cumulative_sum(
		&self,
		kind: &MetricKind,
		range: &DateRange,
	) -> Result<Option<f64>, StoreError>;

	/// All samples for `kind` within `range`, ordered by timestamp
	async fn samples(&self, kind: &MetricKind, range: &DateRange)
		-> Result<Vec<Sample>, StoreError>;
}

/// In-memory health record store
///
/// Keeps samples per metric kind. Used as the test and demo backend and
/// as the reference implementation of the range semantics concrete
/// platform stores must follow.
#[derive(Debug, Clone, Default)]
pub struct MemoryHealthStore {
	records: Arc<DashMap<MetricKind, Vec<Sample>>>,
}

impl MemoryHealthStore {
	pub fn new() -> Self {
		Self {
			records: Arc::new(DashMap::new()),
		}
	}

	/// Record a single sample for a metric kind
	pub fn record(&self, kind: MetricKind, sample: Sample) {
		self.records.entry(kind).or_default().push(sample);
	}

	/// Record a batch of samples for a metric kind
	pub fn record_series(&self, kind: MetricKind, samples: impl IntoIterator<Item = Sample>) {
		self.records.entry(kind).or_default().extend(samples);
	}

	fn matching(&self, kind: &MetricKind, range: &DateRange) -> Vec<Sample> {
		self.records
			.get(kind)
			.map(|entry| {
				entry
					.iter()
					.filter(|sample| range.contains(sample.recorded_at))
					.copied()
					.collect()
			})
			.unwrap_or_default()
	}
}

#[async_trait]
impl HealthStore for MemoryHealthStore {
	async fn cumulative_sum(
		&self,
		kind: &MetricKind,
		range: &DateRange,
	) -> Result<Option<f64>, StoreError> {
		let matching = self.matching(kind, range);
		if matching.is_empty() {
			return Ok(None);
		}
		Ok(Some(matching.iter().map(|sample| sample.value).sum()))
	}

	async fn samples(
		&self,
		kind: &MetricKind,
		range: &DateRange,
	) -> Result<Vec<Sample>, StoreError> {
		let mut matching = self.matching(kind, range);
		matching.sort_by_key(|sample| sample.recorded_at);
		Ok(matching)
	}
}
