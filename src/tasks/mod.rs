//! Background Tasks Module
//!
//! Launches staggered worker tasks and reports their lifecycle.
//!
//! # Tasks
//! - Worker Launcher: spawns `count` workers `start_delay` apart
//! - Worker Unit: started, pause (or custom body), finished

mod launcher;
mod worker;

#[cfg(test)]
mod property_tests;

pub use launcher::{launch, Launch, LaunchConfig, Launcher, WorkerOutcome};
pub use worker::{EventSender, WorkerEvent, WorkerEventKind, WorkerId, WorkerState, WorkerUnit};
