//! Vitals Types
//!
//! Shared models and traits for the vitals aggregator.
//! This crate contains all domain models organized by business entity.

pub mod auth;
pub mod metrics;
pub mod presentation;
pub mod sources;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use metrics::{
	AggregatedSnapshot, ConfigurationError, DateRange, FetchError, FetchResult, MetricKind,
	MetricOutcome, MetricValue, Sample,
};

pub use auth::{AccessError, AccessGrant, AuthGate, OpenGate, ScopedGate};

pub use presentation::PresentationAdapter;

pub use sources::MetricSource;
