//! Mini Worker - launcher demonstration
//!
//! Starts a handful of labelled workers one after another. With the default
//! background disposition the process exits without waiting for them, so
//! the last worker's "finished" line may never be printed.

use tracing::{info, warn};

use mini_worker::{logging, Config, Launcher};

/// Entry point for the launcher demonstration.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Launch workers `start_delay` apart
/// 4. Join foreground workers (background workers are left detached)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: workers={}, label={}, background={}, start_delay={}ms, work_delay={}ms",
        config.worker_count,
        config.worker_label,
        config.worker_background,
        config.start_delay_ms,
        config.work_delay_ms
    );

    let launcher = Launcher::new(config.launch_config());
    let launch = launcher.launch().await?;
    info!("Launched {} workers", launch.len());

    let outcomes = launch.join().await;
    for outcome in outcomes.iter() {
        if let Err(err) = &outcome.result {
            warn!("{}", err);
        }
    }

    info!("Launcher finished");
    Ok(())
}
