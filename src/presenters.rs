//! Basic presentation adapters

use tracing::{info, warn};

use vitals_types::{AggregatedSnapshot, PresentationAdapter};

/// Presenter that renders each snapshot as log lines
///
/// Stands in for a real UI layer: one line per metric, success and
/// error outcomes rendered independently so partial results stay
/// visible.
#[derive(Debug, Clone, Default)]
pub struct LogPresenter;

impl PresentationAdapter for LogPresenter {
	fn on_snapshot(&self, snapshot: AggregatedSnapshot) {
		info!(
			cycle_id = %snapshot.cycle_id(),
			range = %snapshot.range(),
			succeeded = snapshot.succeeded(),
			failed = snapshot.failed(),
			"rendering snapshot"
		);

		for (name, outcome) in snapshot.iter() {
			match outcome {
				Ok(value) => info!(metric = name, ?value, "metric"),
				Err(error) => warn!(metric = name, %error, "metric unavailable"),
			}
		}
	}
}
