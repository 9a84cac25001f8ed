//! End-to-end tests for the auth-gated dashboard flow over a real
//! in-memory health store.

use std::sync::Arc;

use vitals_aggregator::chrono::{DateTime, TimeZone, Utc};
use vitals_aggregator::mocks::{CountingGate, DenyAllGate, MockMetricSource, RecordingPresenter};
use vitals_aggregator::{
	AggregatorBuilder, DashboardError, DateRange, MemoryHealthStore, MetricKind, MetricValue,
	Sample, Settings, SourceSettings,
};

fn ts(secs: i64) -> DateTime<Utc> {
	Utc.timestamp_opt(secs, 0).unwrap()
}

fn day_range() -> DateRange {
	DateRange::new(ts(0), ts(86_400)).unwrap()
}

fn dashboard_settings() -> Settings {
	let mut settings = Settings::default();
	settings.sources.insert(
		"steps".to_string(),
		SourceSettings {
			kind: MetricKind::Steps,
			enabled: true,
			unit_scale: None,
		},
	);
	settings.sources.insert(
		"distance".to_string(),
		SourceSettings {
			kind: MetricKind::Distance,
			enabled: true,
			unit_scale: None,
		},
	);
	settings.sources.insert(
		"heart_rate".to_string(),
		SourceSettings {
			kind: MetricKind::HeartRate,
			enabled: true,
			unit_scale: None,
		},
	);
	settings
}

#[tokio::test]
async fn refresh_aggregates_recorded_health_data() {
	let store = Arc::new(MemoryHealthStore::new());
	store.record(MetricKind::Steps, Sample::new(ts(3_600), 4000.0));
	store.record(MetricKind::Steps, Sample::new(ts(7_200), 213.0));
	// Distance is recorded in meters and reported in kilometers
	store.record(MetricKind::Distance, Sample::new(ts(3_600), 3200.0));
	store.record_series(
		MetricKind::HeartRate,
		vec![Sample::new(ts(7_200), 75.0), Sample::new(ts(3_600), 72.0)],
	);

	let presenter = Arc::new(RecordingPresenter::new());
	let dashboard = AggregatorBuilder::with_store(store)
		.with_settings(dashboard_settings())
		.build(presenter.clone())
		.unwrap();

	let snapshot = dashboard.refresh(day_range()).await.unwrap();

	assert_eq!(
		snapshot.get("steps"),
		Some(&Ok(MetricValue::Scalar(4213.0)))
	);
	assert_eq!(
		snapshot.get("distance"),
		Some(&Ok(MetricValue::Scalar(3.2)))
	);
	let heart_rate = snapshot.get("heart_rate").unwrap().as_ref().unwrap();
	let series = heart_rate.as_series().unwrap();
	assert_eq!(series.len(), 2);
	assert_eq!(series[0].value, 72.0);
	assert_eq!(series[1].value, 75.0);

	assert_eq!(presenter.invocation_count(), 1);
	assert_eq!(presenter.last_snapshot().unwrap(), snapshot);
}

#[tokio::test]
async fn denied_access_performs_no_fetches() {
	let source = MockMetricSource::scalar(MetricKind::Steps, 4213.0);
	let tracker = source.tracker.clone();
	let presenter = Arc::new(RecordingPresenter::new());

	let dashboard = AggregatorBuilder::new()
		.with_auth_gate(DenyAllGate)
		.with_source("steps", Arc::new(source))
		.build(presenter.clone())
		.unwrap();

	let result = dashboard.refresh(day_range()).await;

	assert!(matches!(result, Err(DashboardError::Access(_))));
	assert_eq!(tracker.call_count(), 0);
	assert_eq!(presenter.invocation_count(), 0);
}

#[tokio::test]
async fn grant_is_cached_across_refreshes() {
	let gate = CountingGate::new();
	let gate_tracker = gate.tracker.clone();
	let presenter = Arc::new(RecordingPresenter::new());

	let dashboard = AggregatorBuilder::new()
		.with_auth_gate(gate)
		.with_source(
			"steps",
			Arc::new(MockMetricSource::scalar(MetricKind::Steps, 1.0)),
		)
		.build(presenter.clone())
		.unwrap();

	dashboard.refresh(day_range()).await.unwrap();
	dashboard.refresh(day_range()).await.unwrap();

	assert_eq!(gate_tracker.call_count(), 1);
	assert_eq!(presenter.invocation_count(), 2);
}

#[tokio::test]
async fn empty_range_renders_normalized_zero_values() {
	let store = Arc::new(MemoryHealthStore::new());
	let presenter = Arc::new(RecordingPresenter::new());

	let dashboard = AggregatorBuilder::with_store(store)
		.with_settings(dashboard_settings())
		.build(presenter)
		.unwrap();

	let snapshot = dashboard.refresh(day_range()).await.unwrap();

	// Nothing recorded is zero/empty, not an error
	assert!(snapshot.is_fully_successful());
	assert_eq!(
		snapshot.get("steps"),
		Some(&Ok(MetricValue::Scalar(0.0)))
	);
	assert_eq!(
		snapshot.get("heart_rate"),
		Some(&Ok(MetricValue::SampleSeries(vec![])))
	);
}
