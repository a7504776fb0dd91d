//! Tests for early shutdown through an Interrupt handle

#[cfg(test)]
mod tests {
    use crate::pipeline::api::{RunConfig, ShutdownCoordinator, WorkSimulation};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_interrupt_stops_run_and_counts_drops() {
        let config = RunConfig {
            capacity: 4,
            producers: 1,
            consumers: 1,
            items_per_producer: 200_000,
            grace: Duration::from_secs(30),
            record_items: true,
            // Slow consumer keeps the producer blocked on a full ring
            work: Some(WorkSimulation::new(1, Duration::from_millis(1))),
        };

        let coordinator = ShutdownCoordinator::new(config).unwrap();
        let interrupt = coordinator.interrupt_handle();
        assert!(!interrupt.is_triggered());

        let run = thread::spawn(move || coordinator.run());
        thread::sleep(Duration::from_millis(50));
        interrupt.trigger();
        assert!(interrupt.is_triggered());

        let report = run.join().unwrap().unwrap();

        // The grace interval is skipped once the queue is already stopping
        assert!(report.elapsed < Duration::from_secs(30));
        assert!(report.stats.dropped > 0);
        assert!(report.is_correct());
        assert!(!report.is_lossless());

        let producer = &report.producers[0];
        assert_eq!(producer.accepted + producer.dropped, producer.offered);
        assert_eq!(producer.accepted, report.stats.produced);
        assert_eq!(report.lost(), report.stats.dropped);

        // Everything accepted before the interrupt was still delivered
        let verification = report.verification.as_ref().unwrap();
        assert!(verification.is_clean(), "{:?}", verification);
    }
}
