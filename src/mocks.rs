//! Mock sources, gates, and presenters for tests and demos
//!
//! Timing-controlled sources make concurrency observable: each one
//! records whether it was called and settles after a configurable
//! delay, so tests can pin down exactly-once delivery, deadline
//! behavior, and cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use vitals_types::{
	AccessError, AccessGrant, AggregatedSnapshot, AuthGate, DateRange, FetchError, FetchResult,
	MetricKind, MetricSource, MetricValue, PresentationAdapter,
};

/// Call tracking for verifying which sources were actually fetched
#[derive(Debug, Clone, Default)]
pub struct CallTracker {
	calls: Arc<AtomicUsize>,
}

impl CallTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record_call(&self) {
		self.calls.fetch_add(1, Ordering::SeqCst);
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

/// Mock source that settles with a fixed outcome after a delay
#[derive(Debug, Clone)]
pub struct MockMetricSource {
	kind: MetricKind,
	outcome: Result<MetricValue, FetchError>,
	delay: Duration,
	pub tracker: CallTracker,
}

impl MockMetricSource {
	/// Source that immediately succeeds with `value`
	pub fn scalar(kind: MetricKind, value: f64) -> Self {
		Self::settling(kind, Ok(MetricValue::Scalar(value)), Duration::ZERO)
	}

	/// Source that succeeds with a sample series
	pub fn series(kind: MetricKind, samples: Vec<vitals_types::Sample>) -> Self {
		Self::settling(kind, Ok(MetricValue::SampleSeries(samples)), Duration::ZERO)
	}

	/// Source that immediately fails with `error`
	pub fn failing(kind: MetricKind, error: FetchError) -> Self {
		Self::settling(kind, Err(error), Duration::ZERO)
	}

	/// Source that settles with `outcome` after `delay`
	pub fn settling(
		kind: MetricKind,
		outcome: Result<MetricValue, FetchError>,
		delay: Duration,
	) -> Self {
		Self {
			kind,
			outcome,
			delay,
			tracker: CallTracker::new(),
		}
	}

	/// Delay this source's settling by `delay`
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn call_count(&self) -> usize {
		self.tracker.call_count()
	}
}

#[async_trait]
impl MetricSource for MockMetricSource {
	fn kind(&self) -> MetricKind {
		self.kind.clone()
	}

	async fn fetch(&self, _range: &DateRange) -> FetchResult<MetricValue> {
		self.tracker.record_call();
		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}
		self.outcome.clone()
	}
}

/// Spy presenter recording every snapshot it receives
#[derive(Default)]
pub struct RecordingPresenter {
	invocations: AtomicUsize,
	last: Mutex<Option<AggregatedSnapshot>>,
}

impl RecordingPresenter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn invocation_count(&self) -> usize {
		self.invocations.load(Ordering::SeqCst)
	}

	pub fn last_snapshot(&self) -> Option<AggregatedSnapshot> {
		self.last.lock().expect("presenter lock poisoned").clone()
	}
}

impl PresentationAdapter for RecordingPresenter {
	fn on_snapshot(&self, snapshot: AggregatedSnapshot) {
		self.invocations.fetch_add(1, Ordering::SeqCst);
		*self.last.lock().expect("presenter lock poisoned") = Some(snapshot);
	}
}

/// Gate that denies every request
#[derive(Debug, Clone, Default)]
pub struct DenyAllGate;

#[async_trait]
impl AuthGate for DenyAllGate {
	async fn request_access(&self, _scopes: &[MetricKind]) -> Result<AccessGrant, AccessError> {
		Err(AccessError::Denied {
			reason: "user declined".to_string(),
		})
	}
}

/// Gate that grants everything and counts how often it was asked
#[derive(Debug, Clone, Default)]
pub struct CountingGate {
	pub tracker: CallTracker,
}

impl CountingGate {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn request_count(&self) -> usize {
		self.tracker.call_count()
	}
}

#[async_trait]
impl AuthGate for CountingGate {
	async fn request_access(&self, scopes: &[MetricKind]) -> Result<AccessGrant, AccessError> {
		self.tracker.record_call();
		Ok(AccessGrant::new(scopes.to_vec()))
	}
}
