//! End-to-end delivery through the coordinator

use ringq::pipeline::{BenchSummary, Item, RunConfig, ShutdownCoordinator};
use serial_test::serial;
use std::time::Duration;

#[test]
#[serial]
fn test_small_ring_delivers_every_tag_exactly_once() {
    let config = RunConfig {
        capacity: 8,
        producers: 2,
        consumers: 2,
        items_per_producer: 100_000,
        grace: Duration::from_millis(10),
        record_items: true,
        work: None,
    };

    let report = ShutdownCoordinator::new(config).unwrap().run().unwrap();

    assert_eq!(report.stats.consumed, 200_000);
    assert_eq!(report.stats.produced, 200_000);
    assert_eq!(report.stats.dropped, 0);
    assert_eq!(report.remaining, 0);
    assert!(report.is_lossless());

    let mut received: Vec<Item> = report
        .consumers
        .iter()
        .flat_map(|consumer| consumer.received.iter().flatten().copied())
        .collect();
    received.sort();

    let expected: Vec<Item> = (0..2)
        .flat_map(|producer| (0..100_000).map(move |seq| Item::new(producer, seq)))
        .collect();
    assert_eq!(received, expected);
}

#[test]
#[serial]
fn test_default_work_simulation_still_lossless() {
    let config = RunConfig {
        capacity: 64,
        producers: 4,
        consumers: 3,
        items_per_producer: 20_000,
        grace: Duration::from_millis(5),
        record_items: true,
        ..RunConfig::default()
    };

    let report = ShutdownCoordinator::new(config).unwrap().run().unwrap();

    assert_eq!(report.stats.consumed, 80_000);
    assert!(report.is_lossless());
    let verification = report.verification.unwrap();
    assert!(verification.is_clean(), "{:?}", verification);
}

#[test]
#[serial]
fn test_repeated_runs_summarise() {
    let config = RunConfig {
        capacity: 16,
        producers: 2,
        consumers: 2,
        items_per_producer: 5_000,
        grace: Duration::ZERO,
        record_items: false,
        work: None,
    };

    let reports: Vec<_> = (0..3)
        .map(|_| ShutdownCoordinator::new(config.clone()).unwrap().run().unwrap())
        .collect();
    let summary = BenchSummary::from_reports(&reports).unwrap();

    assert_eq!(summary.runs, 3);
    assert_eq!(summary.correct_runs, 3);
    assert_eq!(summary.lossless_runs, 3);
    assert_eq!(summary.total_dropped, 0);
    assert!(summary.throughput.min > 0.0);
    assert!(summary.throughput.min <= summary.throughput.median);
    assert!(summary.throughput.median <= summary.throughput.max);
}
