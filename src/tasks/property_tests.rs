//! Property-Based Tests for the Worker Launcher
//!
//! Uses proptest to check launch counts and per-worker event ordering.

use std::collections::HashMap;
use std::time::Duration;

use proptest::prelude::*;
use tokio::sync::mpsc;

use crate::error::Error;
use crate::tasks::{LaunchConfig, Launcher, WorkerEvent, WorkerEventKind};

// == Strategies ==
fn label_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{1,4}".prop_map(|s| s)
}

fn config(count: i64, label: String) -> LaunchConfig {
    LaunchConfig {
        count,
        label,
        background: false,
        start_delay: Duration::ZERO,
        work_delay: Duration::from_millis(1),
    }
}

/// Launches, joins and drains every event.
fn run_to_completion(config: LaunchConfig) -> (usize, Vec<WorkerEvent>) {
    tokio_test::block_on(async move {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let launcher = Launcher::new(config).with_events(tx);
        let launch = launcher.launch().await.expect("valid config");
        let launched = launch.len();
        launch.join().await;
        drop(launcher);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (launched, events)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // For any non-negative count, exactly that many workers start and finish.
    #[test]
    fn prop_launches_exactly_count(count in 0i64..8, label in label_strategy()) {
        let (launched, events) = run_to_completion(config(count, label));

        let started = events.iter().filter(|e| e.kind == WorkerEventKind::Started).count();
        let finished = events.iter().filter(|e| e.kind == WorkerEventKind::Finished).count();
        prop_assert_eq!(launched as i64, count);
        prop_assert_eq!(started as i64, count);
        prop_assert_eq!(finished as i64, count);
    }

    // For every worker, the event sequence is exactly Started then Finished.
    #[test]
    fn prop_started_before_finished(count in 1i64..8) {
        let (_, events) = run_to_completion(config(count, "A".to_string()));

        let mut per_worker: HashMap<String, Vec<WorkerEventKind>> = HashMap::new();
        for event in &events {
            per_worker
                .entry(event.worker.to_string())
                .or_default()
                .push(event.kind.clone());
        }
        prop_assert_eq!(per_worker.len() as i64, count);
        for kinds in per_worker.values() {
            prop_assert_eq!(
                kinds,
                &vec![WorkerEventKind::Started, WorkerEventKind::Finished]
            );
        }
    }

    // Any negative count is rejected before a single worker starts.
    #[test]
    fn prop_negative_count_rejected(count in i64::MIN..0) {
        let result = tokio_test::block_on(Launcher::new(config(count, "A".to_string())).launch());
        prop_assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
