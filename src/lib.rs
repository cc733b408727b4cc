//! Mini Worker - staggered background workers and a database diagnostics client
//!
//! Launches labelled worker tasks one after another and talks to an external
//! document database to inspect query execution statistics.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod tasks;

pub use config::Config;
pub use db::{Client, Collection, Database, Filter, IndexSpec};
pub use error::{Error, Result};
pub use tasks::{launch, LaunchConfig, Launcher};
