//! Worker Unit
//!
//! Identity, lifecycle and observations of a single launched worker.

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

// == Worker Id ==
/// Unique identity of a worker within one launch.
///
/// Every worker of a launch shares the same display label, so the sequence
/// index is what tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerId {
    label: String,
    index: usize,
}

impl WorkerId {
    /// Creates a new WorkerId
    pub fn new(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
        }
    }

    /// Shared display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Zero-based launch position
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.label, self.index)
    }
}

// == Worker State ==
/// Lifecycle of a worker: Created -> Running -> Finished | Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Created,
    Running,
    Finished,
    Failed,
}

impl WorkerState {
    /// Returns true for Finished and Failed.
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkerState::Finished | WorkerState::Failed)
    }
}

// == Worker Event ==
/// What a worker observed about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEventKind {
    Started,
    Finished,
    Failed(String),
}

/// Observation emitted by a worker as it moves through its lifecycle.
#[derive(Debug, Clone)]
pub struct WorkerEvent {
    /// Worker that emitted the event
    pub worker: WorkerId,
    /// Kind of observation
    pub kind: WorkerEventKind,
    /// Wall-clock time of the observation
    pub at: DateTime<Utc>,
    /// Monotonic time at which the launcher spawned the worker
    pub launched_at: Instant,
}

/// Channel end that receives worker events.
pub type EventSender = UnboundedSender<WorkerEvent>;

// == Worker Unit ==
/// A single launched worker.
///
/// Owned by the task running it; nothing else keeps a reference once the
/// worker is spawned.
#[derive(Debug)]
pub struct WorkerUnit {
    id: WorkerId,
    background: bool,
    state: WorkerState,
    launched_at: Instant,
    events: Option<EventSender>,
}

impl WorkerUnit {
    pub(crate) fn new(id: WorkerId, background: bool, events: Option<EventSender>) -> Self {
        Self {
            id,
            background,
            state: WorkerState::Created,
            launched_at: Instant::now(),
            events,
        }
    }

    pub fn id(&self) -> &WorkerId {
        &self.id
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    // == Transitions ==
    pub(crate) fn start(&mut self) {
        debug_assert_eq!(self.state, WorkerState::Created);
        self.state = WorkerState::Running;
        info!(
            worker = %self.id,
            background = self.background,
            "{} started!",
            self.id.label()
        );
        self.emit(WorkerEventKind::Started);
    }

    pub(crate) fn finish(&mut self) {
        debug_assert_eq!(self.state, WorkerState::Running);
        self.state = WorkerState::Finished;
        info!(worker = %self.id, "{} finished!", self.id.label());
        self.emit(WorkerEventKind::Finished);
    }

    pub(crate) fn fail(&mut self, reason: &str) {
        debug_assert_eq!(self.state, WorkerState::Running);
        self.state = WorkerState::Failed;
        warn!(worker = %self.id, reason, "{} failed!", self.id.label());
        self.emit(WorkerEventKind::Failed(reason.to_string()));
    }

    fn emit(&self, kind: WorkerEventKind) {
        if let Some(events) = &self.events {
            // Receiver may already be gone; observations are best effort
            let _ = events.send(WorkerEvent {
                worker: self.id.clone(),
                kind,
                at: Utc::now(),
                launched_at: self.launched_at,
            });
        }
    }
}
