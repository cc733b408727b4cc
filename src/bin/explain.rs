//! Query diagnostics against the configured MongoDB deployment
//!
//! Connects to `DATABASE_URL`, explains an equality lookup on `id` and
//! prints the server's execution statistics.

use anyhow::Context;
use tracing::info;

use mini_worker::{logging, Client, Config, Filter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env();
    let client = Client::with_timeout(&config.database_url, config.request_timeout()).await?;
    let collection = client
        .database(&config.database_name)
        .collection(&config.collection_name);
    info!("Explaining lookup on {}", collection.namespace());

    let report = collection
        .explain(&Filter::eq("id", "1"))
        .await
        .with_context(|| format!("explain failed against {}", client.hosts()))?;

    let stats = &report.execution_stats;
    info!(
        "Winning stage {} returned {} documents ({} keys, {} docs examined)",
        stats.execution_stages.stage,
        stats.n_returned,
        stats.total_keys_examined,
        stats.total_docs_examined
    );
    println!("{}", serde_json::to_string_pretty(stats)?);

    drop(collection);
    client.close().await;
    Ok(())
}
