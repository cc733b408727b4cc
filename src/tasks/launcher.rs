//! Worker Launcher
//!
//! Spawns a fixed number of workers one after another, pausing between
//! launches. Background workers are detached and never joined; foreground
//! workers can be awaited through the returned [`Launch`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

use super::worker::{EventSender, WorkerId, WorkerUnit};
use crate::error::{Error, Result};

// == Launch Config ==
/// Parameters of a single launch.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Number of workers; negative values are rejected
    pub count: i64,
    /// Display label given to every worker
    pub label: String,
    /// Detach workers so they never block the caller or process exit
    pub background: bool,
    /// Pause after each launch
    pub start_delay: Duration,
    /// Pause inside each worker
    pub work_delay: Duration,
}

impl LaunchConfig {
    /// Checks the parameters and returns the worker count.
    pub fn validate(&self) -> Result<usize> {
        usize::try_from(self.count).map_err(|_| {
            Error::InvalidArgument(format!(
                "worker count must not be negative, got {}",
                self.count
            ))
        })
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            count: 3,
            label: "A".to_string(),
            background: true,
            start_delay: Duration::from_secs(1),
            work_delay: Duration::from_secs(1),
        }
    }
}

// == Launch ==
/// Result of one worker's execution, as seen by `Launch::join`.
#[derive(Debug)]
pub struct WorkerOutcome {
    pub worker: WorkerId,
    pub result: Result<()>,
}

/// Record of a completed launch sequence.
#[derive(Debug)]
pub struct Launch {
    launched: Vec<WorkerId>,
    joinable: Vec<(WorkerId, JoinHandle<Result<()>>)>,
}

impl Launch {
    /// Ids of all started workers, in launch order.
    pub fn launched(&self) -> &[WorkerId] {
        &self.launched
    }

    pub fn len(&self) -> usize {
        self.launched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.launched.is_empty()
    }

    /// Waits for every foreground worker.
    ///
    /// Background workers were detached at launch and are not part of the
    /// returned outcomes.
    pub async fn join(self) -> Vec<WorkerOutcome> {
        let mut outcomes = Vec::with_capacity(self.joinable.len());
        for (worker, handle) in self.joinable {
            let result = match handle.await {
                Ok(result) => result,
                Err(err) => Err(Error::WorkerFailure {
                    worker: worker.clone(),
                    reason: err.to_string(),
                }),
            };
            outcomes.push(WorkerOutcome { worker, result });
        }
        outcomes
    }
}

// == Launcher ==
/// Launches workers according to a [`LaunchConfig`].
#[derive(Debug, Clone)]
pub struct Launcher {
    config: LaunchConfig,
    events: Option<EventSender>,
}

impl Launcher {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            config,
            events: None,
        }
    }

    /// Delivers every worker event to `events` in addition to the log.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Launches workers whose body simply sleeps for `work_delay`.
    pub async fn launch(&self) -> Result<Launch> {
        let work_delay = self.config.work_delay;
        self.launch_with(move |_| async move {
            sleep(work_delay).await;
            Ok(())
        })
        .await
    }

    /// Launches workers running `body` between their started and finished
    /// observations.
    ///
    /// Returns once the last worker has been launched and the trailing
    /// `start_delay` has elapsed; it never waits for workers to finish.
    pub async fn launch_with<F, Fut>(&self, body: F) -> Result<Launch>
    where
        F: Fn(WorkerId) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let count = self.config.validate()?;
        let body = Arc::new(body);

        info!(
            "Launching {} workers labelled '{}' (background={})",
            count, self.config.label, self.config.background
        );

        let mut launched = Vec::with_capacity(count);
        let mut joinable = Vec::new();

        for index in 0..count {
            let id = WorkerId::new(self.config.label.clone(), index);
            let unit = WorkerUnit::new(id.clone(), self.config.background, self.events.clone());
            let handle = tokio::spawn(run_worker(unit, body.clone()));

            if self.config.background {
                // Dropping the handle detaches the task
                debug!(worker = %id, "Detached background worker");
                drop(handle);
            } else {
                joinable.push((id.clone(), handle));
            }
            launched.push(id);

            sleep(self.config.start_delay).await;
        }

        Ok(Launch { launched, joinable })
    }
}

/// Launches workers with the default sleeping body.
pub async fn launch(config: &LaunchConfig) -> Result<Launch> {
    Launcher::new(config.clone()).launch().await
}

async fn run_worker<F, Fut>(mut unit: WorkerUnit, body: Arc<F>) -> Result<()>
where
    F: Fn(WorkerId) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    unit.start();

    // Run the body on its own task so a panic only ends this worker
    let reason = match tokio::spawn(body(unit.id().clone())).await {
        Ok(Ok(())) => {
            unit.finish();
            return Ok(());
        }
        Ok(Err(err)) => format!("{err:#}"),
        Err(err) => err.to_string(),
    };

    unit.fail(&reason);
    Err(Error::WorkerFailure {
        worker: unit.id().clone(),
        reason,
    })
}
