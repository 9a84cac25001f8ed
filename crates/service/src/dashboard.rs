//! Auth-gated dashboard refresh facade
//!
//! Mirrors the host application's flow: obtain a data-access grant,
//! aggregate all metrics for the visible range, and hand the snapshot
//! to the presentation layer. Repeated refreshes are independent
//! cycles with no coupling to prior cycles.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use vitals_types::{AccessError, AccessGrant, AggregatedSnapshot, AuthGate, DateRange, PresentationAdapter};

use crate::aggregator::AggregatorService;

#[derive(Debug, Error)]
pub enum DashboardError {
	#[error(transparent)]
	Access(#[from] AccessError),
}

/// Facade running auth-gated aggregation cycles for a dashboard
///
/// The aggregator is never invoked before the gate reports a grant
/// covering every source's metric kind. A successful grant is cached so
/// later refreshes skip the consent flow, the way platform permission
/// prompts are only shown once.
pub struct DashboardService {
	auth_gate: Arc<dyn AuthGate>,
	aggregator: AggregatorService,
	presenter: Arc<dyn PresentationAdapter>,
	grant: Mutex<Option<AccessGrant>>,
}

impl DashboardService {
	pub fn new(
		auth_gate: Arc<dyn AuthGate>,
		aggregator: AggregatorService,
		presenter: Arc<dyn PresentationAdapter>,
	) -> Self {
		Self {
			auth_gate,
			aggregator,
			presenter,
			grant: Mutex::new(None),
		}
	}

	/// Run one auth-gated refresh over the date range
	///
	/// On denial no fetch is performed and the presenter is not invoked.
	pub async fn refresh(&self, range: DateRange) -> Result<AggregatedSnapshot, DashboardError> {
		self.ensure_access().await?;

		let snapshot = self
			.aggregator
			.run_cycle_with(range, self.presenter.as_ref())
			.await;
		Ok(snapshot)
	}

	/// Aggregation statistics of the underlying service
	pub fn stats(&self) -> crate::aggregator::AggregationStats {
		self.aggregator.stats()
	}

	async fn ensure_access(&self) -> Result<(), AccessError> {
		let mut grant = self.grant.lock().await;
		if grant.is_some() {
			debug!("reusing cached access grant");
			return Ok(());
		}

		let scopes = self.aggregator.required_scopes();
		let issued = self.auth_gate.request_access(&scopes).await?;
		info!(scopes = scopes.len(), "data access granted");
		*grant = Some(issued);
		Ok(())
	}
}
