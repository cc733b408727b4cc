//! Logging Module
//!
//! Installs the tracing subscriber shared by both binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "mini_worker=info";

/// Initializes the global tracing subscriber.
///
/// Defaults to [`DEFAULT_FILTER`], can be overridden with the `RUST_LOG`
/// env var. Calling it again after a subscriber is installed is a no-op.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
