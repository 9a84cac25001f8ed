//! Configuration settings structures

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vitals_types::MetricKind;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Settings {
	#[serde(default)]
	pub sources: HashMap<String, SourceSettings>,
	#[serde(default)]
	pub timeouts: TimeoutSettings,
	#[serde(default)]
	pub logging: LoggingSettings,
}

impl Settings {
	/// Sources that are enabled, keyed by their snapshot name
	pub fn enabled_sources(&self) -> HashMap<&str, &SourceSettings> {
		self.sources
			.iter()
			.filter(|(_, source)| source.enabled)
			.map(|(name, source)| (name.as_str(), source))
			.collect()
	}
}

/// Individual metric source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceSettings {
	/// Metric kind this source provides
	pub kind: MetricKind,
	/// Whether the source participates in aggregation cycles
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	/// Recording-unit to reporting-unit factor for scalar sources
	pub unit_scale: Option<f64>,
}

fn default_enabled() -> bool {
	true
}

/// Cycle timing configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TimeoutSettings {
	/// Per-cycle deadline in milliseconds
	///
	/// Unset means a cycle waits for its slowest source; bounded values
	/// are recommended anywhere latency matters.
	pub cycle_ms: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Compact,
			structured: false,
		}
	}
}

/// Log output format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}
