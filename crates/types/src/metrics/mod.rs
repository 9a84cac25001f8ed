//! Core metric domain models
//!
//! Metric kinds, fetched values, and the half-open date ranges every
//! source query is scoped to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod snapshot;

pub use errors::{ConfigurationError, FetchError};
pub use snapshot::{AggregatedSnapshot, MetricOutcome};

/// Result type for per-source fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Kind of health metric a source provides
///
/// Doubles as the authorization scope requested from an [`crate::AuthGate`]
/// and as the key concrete stores index their records by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKind {
	/// Daily step count (cumulative sum)
	Steps,
	/// Daily walking/running distance (cumulative sum)
	Distance,
	/// Heart-rate samples across the day (sample series)
	HeartRate,
	/// Any other named metric
	Custom(String),
}

impl MetricKind {
	/// Get string representation
	pub fn as_str(&self) -> &str {
		match self {
			MetricKind::Steps => "steps",
			MetricKind::Distance => "distance",
			MetricKind::HeartRate => "heart_rate",
			MetricKind::Custom(name) => name,
		}
	}
}

impl std::fmt::Display for MetricKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A single timestamped measurement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sample {
	/// When the measurement was recorded
	pub recorded_at: DateTime<Utc>,
	/// Measured value in the source's reporting unit
	pub value: f64,
}

impl Sample {
	pub fn new(recorded_at: DateTime<Utc>, value: f64) -> Self {
		Self { recorded_at, value }
	}
}

/// Value produced by a single metric fetch
///
/// Immutable once produced. Scalar-sum metrics (steps, distance) yield
/// `Scalar`; sampled metrics (heart rate) yield `SampleSeries` ordered by
/// `recorded_at` ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MetricValue {
	/// Aggregated scalar, e.g. total steps over the range
	Scalar(f64),
	/// Ordered sequence of timestamped measurements
	SampleSeries(Vec<Sample>),
}

impl MetricValue {
	/// Scalar value if this is a scalar metric
	pub fn as_scalar(&self) -> Option<f64> {
		match self {
			MetricValue::Scalar(value) => Some(*value),
			MetricValue::SampleSeries(_) => None,
		}
	}

	/// Sample slice if this is a series metric
	pub fn as_series(&self) -> Option<&[Sample]> {
		match self {
			MetricValue::Scalar(_) => None,
			MetricValue::SampleSeries(samples) => Some(samples),
		}
	}

	/// True for `Scalar(0.0)` and empty series, the normalized
	/// "nothing recorded" shapes
	pub fn is_empty(&self) -> bool {
		match self {
			MetricValue::Scalar(value) => *value == 0.0,
			MetricValue::SampleSeries(samples) => samples.is_empty(),
		}
	}
}

/// Half-open time range `[start, end)` a fetch is scoped to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DateRange {
	start: DateTime<Utc>,
	end: DateTime<Utc>,
}

impl DateRange {
	/// Create a range, rejecting `start > end`
	pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConfigurationError> {
		if start > end {
			return Err(ConfigurationError::InvalidDateRange { start, end });
		}
		Ok(Self { start, end })
	}

	/// Range from the start of the current UTC day to now
	pub fn today() -> Self {
		let now = Utc::now();
		let start_of_day = now
			.date_naive()
			.and_hms_opt(0, 0, 0)
			.expect("midnight is always a valid time")
			.and_utc();
		Self {
			start: start_of_day,
			end: now,
		}
	}

	pub fn start(&self) -> DateTime<Utc> {
		self.start
	}

	pub fn end(&self) -> DateTime<Utc> {
		self.end
	}

	/// Half-open containment: `start <= ts < end`
	pub fn contains(&self, ts: DateTime<Utc>) -> bool {
		self.start <= ts && ts < self.end
	}
}

impl std::fmt::Display for DateRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}, {})", self.start, self.end)
	}
}
