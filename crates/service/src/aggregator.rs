//! Core aggregation service logic

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use vitals_types::{
	AggregatedSnapshot, ConfigurationError, DateRange, FetchError, MetricKind, MetricSource,
	PresentationAdapter,
};

/// Service aggregating metrics from multiple named sources
///
/// Each cycle fans out one concurrent fetch per source, waits for all
/// of them to settle, and folds the outcomes into a single immutable
/// snapshot. A source failing is recorded in the snapshot, never
/// propagated as a cycle failure, and never cancels sibling fetches.
pub struct AggregatorService {
	sources: Vec<(String, Arc<dyn MetricSource>)>,
	cycle_deadline: Option<Duration>,
}

impl AggregatorService {
	/// Create an aggregator over named sources with no cycle deadline
	///
	/// Rejects duplicate source names before any fetch can run; silently
	/// keeping one of the colliding sources would drop a metric from
	/// every snapshot.
	pub fn new(sources: Vec<(String, Arc<dyn MetricSource>)>) -> Result<Self, ConfigurationError> {
		Self::with_deadline(sources, None)
	}

	/// Create an aggregator with an optional per-cycle deadline
	///
	/// When a deadline is set, a source that has not settled within it
	/// resolves to `FetchError::Timeout` while faster siblings resolve
	/// normally. Without one a cycle waits as long as its slowest
	/// source; production callers are expected to set a deadline.
	pub fn with_deadline(
		sources: Vec<(String, Arc<dyn MetricSource>)>,
		cycle_deadline: Option<Duration>,
	) -> Result<Self, ConfigurationError> {
		let mut seen = HashSet::new();
		for (name, _) in &sources {
			if !seen.insert(name.clone()) {
				return Err(ConfigurationError::DuplicateSourceName { name: name.clone() });
			}
		}

		Ok(Self {
			sources,
			cycle_deadline,
		})
	}

	/// Names of the registered sources
	pub fn source_names(&self) -> Vec<&str> {
		self.sources.iter().map(|(name, _)| name.as_str()).collect()
	}

	/// Deduplicated metric kinds the sources cover, for access requests
	pub fn required_scopes(&self) -> Vec<MetricKind> {
		let mut scopes = Vec::new();
		for (_, source) in &self.sources {
			let kind = source.kind();
			if !scopes.contains(&kind) {
				scopes.push(kind);
			}
		}
		scopes
	}

	/// Run one aggregation cycle over the date range
	///
	/// Completes exactly once, after every source has settled; the
	/// snapshot's key set equals the registered source names. Zero
	/// sources trivially succeed with an empty snapshot. Dropping the
	/// returned future cancels every in-flight fetch and no snapshot is
	/// produced.
	pub async fn run_cycle(&self, range: DateRange) -> AggregatedSnapshot {
		if self.sources.is_empty() {
			debug!("aggregation cycle with zero sources, returning empty snapshot");
			return AggregatedSnapshot::empty(range);
		}

		info!(
			sources = self.sources.len(),
			%range,
			"starting aggregation cycle"
		);

		let fetches = self.sources.iter().map(|(name, source)| {
			let deadline = self.cycle_deadline;
			async move {
				debug!(source = %name, "starting metric fetch");

				let outcome = match deadline {
					Some(deadline) => match timeout(deadline, source.fetch(&range)).await {
						Ok(outcome) => outcome,
						Err(_) => {
							warn!(
								source = %name,
								timeout_ms = deadline.as_millis() as u64,
								"metric fetch did not settle before the cycle deadline"
							);
							Err(FetchError::Timeout {
								timeout_ms: deadline.as_millis() as u64,
							})
						},
					},
					None => source.fetch(&range).await,
				};

				if let Err(error) = &outcome {
					warn!(source = %name, %error, "metric source settled with an error");
				}

				(name.clone(), outcome)
			}
		});

		// Each fetch settles into its own (name, outcome) pair, so the
		// join point is the only place results are brought together.
		let results = join_all(fetches).await;
		let snapshot = AggregatedSnapshot::from_results(range, results);

		info!(
			cycle_id = %snapshot.cycle_id(),
			succeeded = snapshot.succeeded(),
			failed = snapshot.failed(),
			"aggregation cycle completed"
		);

		snapshot
	}

	/// Run one cycle and hand the snapshot to a presentation adapter
	///
	/// The adapter is invoked exactly once, after all sources settled.
	/// Cancelling (dropping) the future before completion means the
	/// adapter is never invoked for this cycle.
	pub async fn run_cycle_with(
		&self,
		range: DateRange,
		presenter: &dyn PresentationAdapter,
	) -> AggregatedSnapshot {
		let snapshot = self.run_cycle(range).await;
		presenter.on_snapshot(snapshot.clone());
		snapshot
	}

	/// Get aggregation statistics
	pub fn stats(&self) -> AggregationStats {
		AggregationStats {
			total_sources: self.sources.len(),
			cycle_deadline_ms: self
				.cycle_deadline
				.map(|deadline| deadline.as_millis() as u64),
		}
	}
}

/// Aggregation service statistics
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationStats {
	pub total_sources: usize,
	pub cycle_deadline_ms: Option<u64>,
}
