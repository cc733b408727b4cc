//! Integration Tests for the Worker Launcher
//!
//! Exercises launch timing, detached workers and failure isolation through
//! the public API.

use std::time::Duration;

use mini_worker::tasks::{LaunchConfig, Launcher, WorkerEvent, WorkerEventKind};
use mini_worker::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::timeout;

// == Helper Functions ==

fn config(count: i64, background: bool, start_delay: Duration, work_delay: Duration) -> LaunchConfig {
    LaunchConfig {
        count,
        label: "A".to_string(),
        background,
        start_delay,
        work_delay,
    }
}

async fn collect(rx: &mut UnboundedReceiver<WorkerEvent>, n: usize) -> Vec<WorkerEvent> {
    let mut events = Vec::with_capacity(n);
    while events.len() < n {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for worker events")
            .expect("event channel closed");
        events.push(event);
    }
    events
}

// == Launch Timing ==

#[tokio::test]
async fn test_launches_are_spaced_by_start_delay() {
    let start_delay = Duration::from_millis(50);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let launcher =
        Launcher::new(config(3, false, start_delay, Duration::from_millis(1))).with_events(tx);

    let launch = launcher.launch().await.unwrap();
    launch.join().await;

    let events = collect(&mut rx, 6).await;
    let mut launched_at: Vec<_> = events
        .iter()
        .filter(|e| e.kind == WorkerEventKind::Started)
        .map(|e| (e.worker.index(), e.launched_at))
        .collect();
    launched_at.sort_by_key(|(index, _)| *index);

    assert_eq!(launched_at.len(), 3);
    for pair in launched_at.windows(2) {
        let gap = pair[1].1.duration_since(pair[0].1);
        assert!(gap >= start_delay, "launch gap {gap:?} shorter than {start_delay:?}");
    }
}

#[tokio::test]
async fn test_started_timestamps_are_spaced_by_start_delay() {
    let start_delay = Duration::from_millis(50);
    // Wall-clock resolution and task wake-up jitter
    let tolerance = chrono::Duration::milliseconds(10);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let launcher =
        Launcher::new(config(3, false, start_delay, Duration::from_millis(1))).with_events(tx);

    let launch = launcher.launch().await.unwrap();
    launch.join().await;

    let events = collect(&mut rx, 6).await;
    let mut started_at: Vec<_> = events
        .iter()
        .filter(|e| e.kind == WorkerEventKind::Started)
        .map(|e| (e.worker.index(), e.at))
        .collect();
    started_at.sort_by_key(|(index, _)| *index);

    let minimum = chrono::Duration::from_std(start_delay).unwrap() - tolerance;
    assert_eq!(started_at.len(), 3);
    for pair in started_at.windows(2) {
        let gap = pair[1].1 - pair[0].1;
        assert!(gap >= minimum, "started gap {gap} shorter than {minimum}");
    }
}

#[tokio::test]
async fn test_launch_does_not_wait_for_workers() {
    let launcher = Launcher::new(config(
        2,
        false,
        Duration::from_millis(1),
        Duration::from_millis(500),
    ));

    let started = std::time::Instant::now();
    let launch = launcher.launch().await.unwrap();
    assert!(started.elapsed() < Duration::from_millis(500));

    let outcomes = launch.join().await;
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    assert!(started.elapsed() >= Duration::from_millis(500));
}

// == Worker Lifecycle ==

#[tokio::test]
async fn test_each_worker_starts_before_it_finishes() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let launcher = Launcher::new(config(
        4,
        false,
        Duration::from_millis(2),
        Duration::from_millis(5),
    ))
    .with_events(tx);

    let launch = launcher.launch().await.unwrap();
    assert_eq!(launch.len(), 4);
    launch.join().await;

    let events = collect(&mut rx, 8).await;
    for index in 0..4 {
        let kinds: Vec<_> = events
            .iter()
            .filter(|e| e.worker.index() == index)
            .map(|e| e.kind.clone())
            .collect();
        assert_eq!(kinds, vec![WorkerEventKind::Started, WorkerEventKind::Finished]);
    }
}

#[tokio::test]
async fn test_workers_share_label_but_not_id() {
    let launcher = Launcher::new(config(3, true, Duration::ZERO, Duration::ZERO));
    let launch = launcher.launch().await.unwrap();

    let ids: Vec<String> = launch.launched().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["A-0", "A-1", "A-2"]);
    assert!(launch.launched().iter().all(|id| id.label() == "A"));
}

// == Background Workers ==

#[tokio::test]
async fn test_background_finish_may_be_absent() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let launcher = Launcher::new(config(
        3,
        true,
        Duration::from_millis(10),
        Duration::from_secs(30),
    ))
    .with_events(tx);

    let launch = launcher.launch().await.unwrap();
    assert_eq!(launch.len(), 3);

    // Every worker has started by the time the launch sequence returns
    let started = collect(&mut rx, 3).await;
    assert!(started.iter().all(|e| e.kind == WorkerEventKind::Started));

    // Nothing to join; finished observations are permitted to be missing
    assert!(launch.join().await.is_empty());
    let mut finished = 0;
    while let Ok(event) = rx.try_recv() {
        if event.kind == WorkerEventKind::Finished {
            finished += 1;
        }
    }
    assert!(finished <= 3);
}

// == Invalid Arguments ==

#[tokio::test]
async fn test_negative_count_is_invalid_argument() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let launcher = Launcher::new(config(-1, true, Duration::ZERO, Duration::ZERO)).with_events(tx);

    let result = launcher.launch().await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));

    drop(launcher);
    assert!(rx.recv().await.is_none());
}

// == Worker Failures ==

#[tokio::test]
async fn test_failure_only_affects_that_worker() {
    let launcher = Launcher::new(config(3, false, Duration::from_millis(1), Duration::ZERO));

    let launch = launcher
        .launch_with(|id| async move {
            if id.index() == 1 {
                anyhow::bail!("worker {} gave up", id);
            }
            Ok(())
        })
        .await
        .unwrap();
    let outcomes = launch.join().await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        &outcomes[1].result,
        Err(Error::WorkerFailure { reason, .. }) if reason.contains("gave up")
    ));
    assert!(outcomes[2].result.is_ok());
}

#[tokio::test]
async fn test_panicking_worker_is_contained() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let launcher =
        Launcher::new(config(2, false, Duration::from_millis(1), Duration::ZERO)).with_events(tx);

    let launch = launcher
        .launch_with(|id| async move {
            if id.index() == 0 {
                panic!("unexpected state");
            }
            Ok(())
        })
        .await
        .unwrap();
    let outcomes = launch.join().await;

    assert!(matches!(outcomes[0].result, Err(Error::WorkerFailure { .. })));
    assert!(outcomes[1].result.is_ok());

    let events = collect(&mut rx, 4).await;
    assert!(events
        .iter()
        .any(|e| e.worker.index() == 0 && matches!(e.kind, WorkerEventKind::Failed(_))));
    assert!(events
        .iter()
        .any(|e| e.worker.index() == 1 && e.kind == WorkerEventKind::Finished));
}
