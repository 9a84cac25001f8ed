//! Per-cycle aggregation result

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DateRange, FetchError, MetricValue};

/// Outcome recorded in the snapshot for one source
pub type MetricOutcome = Result<MetricValue, FetchError>;

/// Immutable result of one aggregation cycle
///
/// Maps each source name to the outcome its fetch settled with. Built
/// exactly once per cycle at the join point; the key set always equals
/// the set of source names the cycle was started with. Partial success
/// is a normal state: the presentation layer maps each outcome to a
/// success or error visual independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedSnapshot {
	cycle_id: Uuid,
	range: DateRange,
	results: HashMap<String, MetricOutcome>,
}

impl AggregatedSnapshot {
	/// Build the snapshot from settled `(name, outcome)` pairs
	///
	/// Callers guarantee the names are distinct; the coordinator enforces
	/// that before dispatching any fetch.
	pub fn from_results(range: DateRange, results: Vec<(String, MetricOutcome)>) -> Self {
		Self {
			cycle_id: Uuid::new_v4(),
			range,
			results: results.into_iter().collect(),
		}
	}

	/// Empty snapshot for a cycle with zero sources
	pub fn empty(range: DateRange) -> Self {
		Self::from_results(range, Vec::new())
	}

	/// Identifier of the cycle that produced this snapshot
	pub fn cycle_id(&self) -> Uuid {
		self.cycle_id
	}

	/// Range the cycle queried
	pub fn range(&self) -> DateRange {
		self.range
	}

	/// Outcome for a single source name
	pub fn get(&self, name: &str) -> Option<&MetricOutcome> {
		self.results.get(name)
	}

	/// All source names present in the snapshot, unordered
	pub fn metric_names(&self) -> impl Iterator<Item = &str> {
		self.results.keys().map(String::as_str)
	}

	/// Iterate over `(name, outcome)` pairs, unordered
	pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricOutcome)> {
		self.results.iter().map(|(name, outcome)| (name.as_str(), outcome))
	}

	pub fn len(&self) -> usize {
		self.results.len()
	}

	pub fn is_empty(&self) -> bool {
		self.results.is_empty()
	}

	/// Number of sources that settled successfully
	pub fn succeeded(&self) -> usize {
		self.results.values().filter(|r| r.is_ok()).count()
	}

	/// Number of sources that settled with a fetch error
	pub fn failed(&self) -> usize {
		self.results.values().filter(|r| r.is_err()).count()
	}

	pub fn is_fully_successful(&self) -> bool {
		self.failed() == 0
	}
}
