//! End-to-end tests for the aggregation cycle: concurrency, partial
//! failure, deadlines, and cancellation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use vitals_aggregator::chrono::{DateTime, TimeZone, Utc};
use vitals_aggregator::mocks::{MockMetricSource, RecordingPresenter};
use vitals_aggregator::{
	AggregatorService, ConfigurationError, DateRange, FetchError, MetricKind, MetricSource,
	MetricValue, Sample,
};

fn ts(secs: i64) -> DateTime<Utc> {
	Utc.timestamp_opt(secs, 0).unwrap()
}

fn day_range() -> DateRange {
	DateRange::new(ts(0), ts(86_400)).unwrap()
}

fn named(name: &str, source: MockMetricSource) -> (String, Arc<dyn MetricSource>) {
	(name.to_string(), Arc::new(source))
}

#[tokio::test]
async fn three_sources_aggregate_concurrently_and_deliver_once() {
	let t0 = ts(100);
	let t1 = ts(200);
	let heart_rate_samples = vec![Sample::new(t0, 72.0), Sample::new(t1, 75.0)];

	let service = AggregatorService::new(vec![
		named(
			"steps",
			MockMetricSource::scalar(MetricKind::Steps, 4213.0)
				.with_delay(Duration::from_millis(10)),
		),
		named(
			"distance",
			MockMetricSource::scalar(MetricKind::Distance, 3.2)
				.with_delay(Duration::from_millis(15)),
		),
		named(
			"heart_rate",
			MockMetricSource::series(MetricKind::HeartRate, heart_rate_samples.clone())
				.with_delay(Duration::from_millis(20)),
		),
	])
	.unwrap();

	let presenter = Arc::new(RecordingPresenter::new());
	let started = Instant::now();
	let snapshot = service.run_cycle_with(day_range(), presenter.as_ref()).await;
	let elapsed = started.elapsed();

	// No earlier than the slowest source, and nowhere near the serial sum
	assert!(elapsed >= Duration::from_millis(20));
	assert!(elapsed < Duration::from_millis(200));

	assert_eq!(
		snapshot.get("steps"),
		Some(&Ok(MetricValue::Scalar(4213.0)))
	);
	assert_eq!(
		snapshot.get("distance"),
		Some(&Ok(MetricValue::Scalar(3.2)))
	);
	assert_eq!(
		snapshot.get("heart_rate"),
		Some(&Ok(MetricValue::SampleSeries(heart_rate_samples)))
	);

	assert_eq!(presenter.invocation_count(), 1);
	assert_eq!(presenter.last_snapshot().unwrap(), snapshot);
}

#[tokio::test]
async fn single_failure_does_not_abort_siblings() {
	let service = AggregatorService::new(vec![
		named("steps", MockMetricSource::scalar(MetricKind::Steps, 4213.0)),
		named("distance", MockMetricSource::scalar(MetricKind::Distance, 3.2)),
		named(
			"heart_rate",
			MockMetricSource::failing(
				MetricKind::HeartRate,
				FetchError::Platform {
					detail: "sensor offline".to_string(),
				},
			),
		),
	])
	.unwrap();

	let snapshot = service.run_cycle(day_range()).await;

	assert_eq!(snapshot.len(), 3);
	assert_eq!(snapshot.succeeded(), 2);
	assert_eq!(snapshot.failed(), 1);
	assert_eq!(
		snapshot.get("heart_rate"),
		Some(&Err(FetchError::Platform {
			detail: "sensor offline".to_string()
		}))
	);
	assert!(snapshot.get("steps").unwrap().is_ok());
	assert!(snapshot.get("distance").unwrap().is_ok());
}

#[tokio::test]
async fn zero_sources_return_empty_snapshot_immediately() {
	let service = AggregatorService::new(Vec::new()).unwrap();

	let started = Instant::now();
	let snapshot = service.run_cycle(day_range()).await;

	assert!(snapshot.is_empty());
	assert!(started.elapsed() < Duration::from_millis(50));
}

#[tokio::test]
async fn duplicate_source_names_reject_without_fetching() {
	let first = MockMetricSource::scalar(MetricKind::Steps, 1.0);
	let second = MockMetricSource::scalar(MetricKind::Steps, 2.0);
	let first_tracker = first.tracker.clone();
	let second_tracker = second.tracker.clone();

	let result = AggregatorService::new(vec![named("steps", first), named("steps", second)]);

	assert_eq!(
		result.err(),
		Some(ConfigurationError::DuplicateSourceName {
			name: "steps".to_string()
		})
	);
	assert_eq!(first_tracker.call_count(), 0);
	assert_eq!(second_tracker.call_count(), 0);
}

#[tokio::test]
async fn deadline_times_out_slow_source_while_siblings_resolve() {
	let service = AggregatorService::with_deadline(
		vec![
			named(
				"steps",
				MockMetricSource::scalar(MetricKind::Steps, 4213.0)
					.with_delay(Duration::from_millis(5)),
			),
			named(
				"heart_rate",
				MockMetricSource::series(MetricKind::HeartRate, vec![])
					.with_delay(Duration::from_millis(500)),
			),
		],
		Some(Duration::from_millis(50)),
	)
	.unwrap();

	let presenter = Arc::new(RecordingPresenter::new());
	let snapshot = service.run_cycle_with(day_range(), presenter.as_ref()).await;

	assert_eq!(
		snapshot.get("steps"),
		Some(&Ok(MetricValue::Scalar(4213.0)))
	);
	assert_eq!(
		snapshot.get("heart_rate"),
		Some(&Err(FetchError::Timeout { timeout_ms: 50 }))
	);
	// The cycle still completed exactly once
	assert_eq!(presenter.invocation_count(), 1);
}

#[tokio::test]
async fn cancelled_cycle_never_reaches_the_presenter() {
	let service = AggregatorService::new(vec![named(
		"steps",
		MockMetricSource::scalar(MetricKind::Steps, 4213.0).with_delay(Duration::from_millis(200)),
	)])
	.unwrap();

	let presenter = Arc::new(RecordingPresenter::new());

	tokio::select! {
		_ = service.run_cycle_with(day_range(), presenter.as_ref()) => {
			panic!("cycle should have been cancelled before completing");
		},
		_ = tokio::time::sleep(Duration::from_millis(20)) => {},
	}

	// Give a would-be stray delivery time to show up
	tokio::time::sleep(Duration::from_millis(300)).await;
	assert_eq!(presenter.invocation_count(), 0);
}

#[tokio::test]
async fn repeated_cycles_are_independent() {
	let source = MockMetricSource::scalar(MetricKind::Steps, 4213.0);
	let tracker = source.tracker.clone();
	let service = AggregatorService::new(vec![named("steps", source)]).unwrap();

	let first = service.run_cycle(day_range()).await;
	let second = service.run_cycle(day_range()).await;

	assert_eq!(tracker.call_count(), 2);
	assert_ne!(first.cycle_id(), second.cycle_id());
	assert_eq!(first.get("steps"), second.get("steps"));
}
