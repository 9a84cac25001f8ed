//! Vitals Aggregator Library
//!
//! Auth-gated concurrent aggregation of health metric sources: N
//! independent async fetches fanned out per cycle, folded into a single
//! immutable snapshot, and delivered to the presentation layer exactly
//! once.

// Core domain types - the most commonly used types
pub use vitals_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	AccessError,
	AccessGrant,
	AggregatedSnapshot,
	// Auth traits and gates
	AuthGate,
	ConfigurationError,
	DateRange,
	// Error types
	FetchError,
	FetchResult,
	MetricKind,
	MetricOutcome,
	// Core source trait
	MetricSource,
	// Primary domain entities
	MetricValue,
	OpenGate,
	PresentationAdapter,
	Sample,
	ScopedGate,
};

// Service layer
pub use vitals_service::{
	AggregationStats, AggregatorService, DashboardError, DashboardService,
};

// Concrete sources
pub use vitals_sources::{
	CumulativeSumSource, HealthStore, MemoryHealthStore, SampleSeriesSource, SourceFactory,
	StoreError,
};

// Config
pub use vitals_config::{load_config, LogFormat, Settings, SourceSettings};

// Module aliases for advanced usage
pub mod models {
	pub use vitals_types::*;
}

pub mod service {
	pub use vitals_service::*;
}

pub mod sources {
	pub use vitals_sources::*;
}

pub mod config {
	pub use vitals_config::*;
}

pub mod mocks;
pub mod presenters;

use std::sync::Arc;

use tracing::info;

// Re-export external dependencies for downstream tests and demos
pub use async_trait;

/// Builder wiring up the dashboard stack
///
/// Collects settings, an auth gate, a health store, and sources (either
/// registered directly or materialized from configuration), then builds
/// a ready-to-refresh [`DashboardService`].
pub struct AggregatorBuilder<G = OpenGate>
where
	G: AuthGate + 'static,
{
	settings: Option<Settings>,
	auth_gate: G,
	store: Arc<dyn HealthStore>,
	sources: Vec<(String, Arc<dyn MetricSource>)>,
}

impl Default for AggregatorBuilder<OpenGate> {
	fn default() -> Self {
		Self::new()
	}
}

impl AggregatorBuilder<OpenGate> {
	/// Create a builder with an open gate and an in-memory store
	pub fn new() -> Self {
		Self::with_store(Arc::new(MemoryHealthStore::new()))
	}

	/// Create a builder over a specific health store
	pub fn with_store(store: Arc<dyn HealthStore>) -> Self {
		Self {
			settings: None,
			auth_gate: OpenGate,
			store,
			sources: Vec::new(),
		}
	}
}

impl<G> AggregatorBuilder<G>
where
	G: AuthGate + 'static,
{
	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Set a custom auth gate
	pub fn with_auth_gate<NewG>(self, auth_gate: NewG) -> AggregatorBuilder<NewG>
	where
		NewG: AuthGate + 'static,
	{
		AggregatorBuilder {
			settings: self.settings,
			auth_gate,
			store: self.store,
			sources: self.sources,
		}
	}

	/// Register a source under a snapshot name
	pub fn with_source(mut self, name: impl Into<String>, source: Arc<dyn MetricSource>) -> Self {
		self.sources.push((name.into(), source));
		self
	}

	/// Initialize tracing with configuration-based settings
	pub fn init_tracing_from_settings(&self) -> Result<(), Box<dyn std::error::Error>> {
		let logging = self
			.settings
			.as_ref()
			.map(|settings| settings.logging.clone())
			.unwrap_or_default();

		// Create env filter using config level or environment variable
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

		match logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			logging.level, logging.format, logging.structured
		);

		Ok(())
	}

	/// Build the dashboard service delivering snapshots to `presenter`
	///
	/// Sources declared in settings are materialized over the builder's
	/// store and combined with directly registered ones; duplicate
	/// names are rejected before any cycle can run.
	pub fn build(
		self,
		presenter: Arc<dyn PresentationAdapter>,
	) -> Result<DashboardService, ConfigurationError> {
		let auth_gate = Arc::new(self.auth_gate) as Arc<dyn AuthGate>;
		let builder = AggregatorBuilder {
			settings: self.settings,
			auth_gate: OpenGate,
			store: self.store,
			sources: self.sources,
		};
		let aggregator = builder.build_aggregator()?;

		info!(
			sources = aggregator.stats().total_sources,
			"Successfully initialized aggregator"
		);

		Ok(DashboardService::new(auth_gate, aggregator, presenter))
	}

	/// Build only the aggregation service, without the auth-gated facade
	pub fn build_aggregator(self) -> Result<AggregatorService, ConfigurationError> {
		let settings = self.settings.unwrap_or_default();

		let mut sources = self.sources;
		for (name, source_settings) in settings.enabled_sources() {
			let source: Arc<dyn MetricSource> = match source_settings.unit_scale {
				Some(scale) => SourceFactory::for_kind_with_scale(
					source_settings.kind.clone(),
					Arc::clone(&self.store),
					scale,
				)
				.into(),
				None => {
					SourceFactory::for_kind(source_settings.kind.clone(), Arc::clone(&self.store))
						.into()
				},
			};
			sources.push((name.to_string(), source));
		}

		let deadline = settings
			.timeouts
			.cycle_ms
			.map(std::time::Duration::from_millis);
		AggregatorService::with_deadline(sources, deadline)
	}
}
