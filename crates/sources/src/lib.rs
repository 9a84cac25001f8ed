//! Vitals Sources
//!
//! Concrete metric source implementations for the vitals aggregator,
//! all reading through the [`HealthStore`] seam.

pub mod sample_series;
pub mod scalar_sum;
pub mod store;

pub use sample_series::SampleSeriesSource;
pub use scalar_sum::CumulativeSumSource;
pub use store::{HealthStore, MemoryHealthStore, StoreError};
pub use vitals_types::{FetchError, FetchResult, MetricSource};

use std::sync::Arc;

use vitals_types::MetricKind;

/// Distance records are stored in meters and reported in kilometers
const METERS_TO_KILOMETERS: f64 = 0.001;

/// Factory building the right source shape for a metric kind
///
/// Steps and distance are cumulative-sum statistics; heart rate is a
/// sample series. Custom kinds default to a unit-scale cumulative sum.
pub struct SourceFactory;

impl SourceFactory {
	pub fn for_kind(kind: MetricKind, store: Arc<dyn HealthStore>) -> Box<dyn MetricSource> {
		match kind {
			MetricKind::HeartRate => Box::new(SampleSeriesSource::new(kind, store)),
			MetricKind::Distance => Box::new(CumulativeSumSource::with_unit_scale(
				kind,
				store,
				METERS_TO_KILOMETERS,
			)),
			MetricKind::Steps | MetricKind::Custom(_) => {
				Box::new(CumulativeSumSource::new(kind, store))
			},
		}
	}

	/// Same shapes as [`Self::for_kind`], with an explicit unit scale
	/// for scalar kinds
	pub fn for_kind_with_scale(
		kind: MetricKind,
		store: Arc<dyn HealthStore>,
		unit_scale: f64,
	) -> Box<dyn MetricSource> {
		match kind {
			MetricKind::HeartRate => Box::new(SampleSeriesSource::new(kind, store)),
			_ => Box::new(CumulativeSumSource::with_unit_scale(kind, store, unit_scale)),
		}
	}
}
