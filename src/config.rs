//! Configuration Module
//!
//! Handles loading launcher and database settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::tasks::LaunchConfig;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables. The defaults
/// reproduce the classic demonstration: three background workers labelled
/// `A`, one second apart, each working for one second.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of workers to launch
    pub worker_count: i64,
    /// Display label shared by every worker
    pub worker_label: String,
    /// Whether workers are detached from the launcher
    pub worker_background: bool,
    /// Pause between successive launches in milliseconds
    pub start_delay_ms: u64,
    /// Pause inside each worker in milliseconds
    pub work_delay_ms: u64,
    /// MongoDB connection string
    pub database_url: String,
    /// Logical database name
    pub database_name: String,
    /// Collection name
    pub collection_name: String,
    /// Server selection timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `WORKER_COUNT` - Number of workers (default: 3)
    /// - `WORKER_LABEL` - Shared worker label (default: "A")
    /// - `WORKER_BACKGROUND` - Detach workers (default: true)
    /// - `START_DELAY_MS` - Delay between launches (default: 1000)
    /// - `WORK_DELAY_MS` - Delay inside each worker (default: 1000)
    /// - `DATABASE_URL` - MongoDB connection string (default: "mongodb://localhost:27017/")
    /// - `DATABASE_NAME` - Database name (default: "test_db")
    /// - `COLLECTION_NAME` - Collection name (default: "test_collection")
    /// - `REQUEST_TIMEOUT_SECS` - Server selection timeout (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            worker_count: parse_var("WORKER_COUNT").unwrap_or(defaults.worker_count),
            worker_label: env::var("WORKER_LABEL").unwrap_or(defaults.worker_label),
            worker_background: parse_var("WORKER_BACKGROUND")
                .unwrap_or(defaults.worker_background),
            start_delay_ms: parse_var("START_DELAY_MS").unwrap_or(defaults.start_delay_ms),
            work_delay_ms: parse_var("WORK_DELAY_MS").unwrap_or(defaults.work_delay_ms),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_name: env::var("DATABASE_NAME").unwrap_or(defaults.database_name),
            collection_name: env::var("COLLECTION_NAME").unwrap_or(defaults.collection_name),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Builds the launcher parameters from this configuration.
    pub fn launch_config(&self) -> LaunchConfig {
        LaunchConfig {
            count: self.worker_count,
            label: self.worker_label.clone(),
            background: self.worker_background,
            start_delay: Duration::from_millis(self.start_delay_ms),
            work_delay: Duration::from_millis(self.work_delay_ms),
        }
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_count: 3,
            worker_label: "A".to_string(),
            worker_background: true,
            start_delay_ms: 1000,
            work_delay_ms: 1000,
            database_url: "mongodb://localhost:27017/".to_string(),
            database_name: "test_db".to_string(),
            collection_name: "test_collection".to_string(),
            request_timeout: 5,
        }
    }
}
