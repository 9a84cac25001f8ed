//! Seam between the aggregation core and whatever renders it

use crate::metrics::AggregatedSnapshot;

/// Consumer of completed aggregation cycles
///
/// Receives each cycle's snapshot at most once, after every source has
/// settled; a cancelled cycle never reaches the adapter. Mapping each
/// per-metric outcome to a loading/error/success visual, and marshaling
/// to a UI thread, are the adapter's concern. Adapters never call back
/// into the coordinator.
pub trait PresentationAdapter: Send + Sync {
	fn on_snapshot(&self, snapshot: AggregatedSnapshot);
}
