//! Database client
//!
//! Wraps the MongoDB driver client. Handles returned by
//! [`Client::database`] and [`Database::collection`] share its connection
//! pool.

use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use tracing::debug;

use super::collection::Collection;
use crate::error::Result;
use crate::models::{Document, Namespace};

/// Server selection and connect timeout used by [`Client::connect`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const APP_NAME: &str = "mini_worker";

// == Client ==
/// Connection to a MongoDB deployment.
///
/// Construction only parses the connection string; an unreachable server is
/// reported by the first operation (or by [`Client::ping`]).
#[derive(Debug, Clone)]
pub struct Client {
    inner: mongodb::Client,
    hosts: Arc<str>,
}

impl Client {
    /// Creates a client for a `mongodb://` connection string with the
    /// default timeout.
    pub async fn connect(uri: &str) -> Result<Self> {
        Self::with_timeout(uri, DEFAULT_TIMEOUT).await
    }

    /// Creates a client that gives up selecting a server after `timeout`.
    pub async fn with_timeout(uri: &str, timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let hosts = options
            .hosts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let inner = mongodb::Client::with_options(options)?;

        debug!("Database client created for {}", hosts);
        Ok(Self {
            inner,
            hosts: hosts.into(),
        })
    }

    /// Comma separated `host:port` list, without credentials.
    pub fn hosts(&self) -> &str {
        &self.hosts
    }

    pub fn database(&self, name: impl Into<String>) -> Database {
        let name = name.into();
        Database {
            client: self.clone(),
            inner: self.inner.database(&name),
            name,
        }
    }

    /// Runs `{ping: 1}` against the `admin` database.
    pub async fn ping(&self) -> Result<()> {
        self.inner
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// Closes the connection pool, waiting for open cursors to finish.
    pub async fn close(self) {
        debug!("Closing database client for {}", self.hosts);
        self.inner.shutdown().await;
    }
}

// == Database ==
/// A logical database on the server.
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    inner: mongodb::Database,
    name: String,
}

impl Database {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn collection(&self, name: impl Into<String>) -> Collection {
        let namespace = Namespace::new(self.name.clone(), name);
        Collection::new(
            self.inner.clone(),
            self.inner.collection::<Document>(&namespace.collection),
            namespace,
        )
    }
}
