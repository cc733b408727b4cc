//! Collection handle
//!
//! Issues reads, explains and index requests against one namespace.

use tracing::{debug, info};

use super::filter::Filter;
use super::index::IndexSpec;
use crate::error::Result;
use crate::models::{explain_find_command, Document, ExplainReport, IndexInfo, Namespace};

/// A collection within a database.
#[derive(Debug, Clone)]
pub struct Collection {
    database: mongodb::Database,
    inner: mongodb::Collection<Document>,
    namespace: Namespace,
}

impl Collection {
    pub(crate) fn new(
        database: mongodb::Database,
        inner: mongodb::Collection<Document>,
        namespace: Namespace,
    ) -> Self {
        Self {
            database,
            inner,
            namespace,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.namespace.collection
    }

    // == Find ==
    /// Returns every document matching `filter`.
    pub async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        let mut cursor = self.inner.find(filter.as_document().clone()).await?;
        let mut documents = Vec::new();
        while cursor.advance().await? {
            documents.push(cursor.deserialize_current()?);
        }
        debug!(
            "find on {} returned {} documents",
            self.namespace,
            documents.len()
        );
        Ok(documents)
    }

    // == Explain ==
    /// Asks the server how it executes `find(filter)`, with execution
    /// statistics.
    ///
    /// A reply without `executionStats.executionStages` is rejected rather
    /// than returned partially.
    pub async fn explain(&self, filter: &Filter) -> Result<ExplainReport> {
        let command = explain_find_command(&self.namespace, filter);
        let reply = self.database.run_command(command).await?;
        let report: ExplainReport = mongodb::bson::from_document(reply)?;
        debug!(
            "explain on {}: stage={} returned={}",
            self.namespace,
            report.winning_stage(),
            report.execution_stats.n_returned
        );
        Ok(report)
    }

    // == Insert ==
    /// Inserts `documents`, returning how many the server accepted.
    pub async fn insert_many(&self, documents: Vec<Document>) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self.inner.insert_many(documents).await?;
        Ok(result.inserted_ids.len())
    }

    // == Create Index ==
    /// Asks the server to build `spec`, returning the index name.
    pub async fn create_index(&self, spec: &IndexSpec) -> Result<String> {
        spec.validate()?;
        let result = self.inner.create_index(spec.to_model()).await?;

        match spec.expire_after_seconds() {
            Some(ttl) => info!(
                "Created TTL index {} on {} (expire after {}s)",
                result.index_name, self.namespace, ttl
            ),
            None => info!("Created index {} on {}", result.index_name, self.namespace),
        }
        Ok(result.index_name)
    }

    // == List Indexes ==
    pub async fn list_indexes(&self) -> Result<Vec<IndexInfo>> {
        let mut cursor = self.inner.list_indexes().await?;
        let mut indexes = Vec::new();
        while cursor.advance().await? {
            indexes.push(IndexInfo::from(cursor.deserialize_current()?));
        }
        Ok(indexes)
    }

    // == Drop ==
    /// Drops the collection and its indexes.
    pub async fn drop(&self) -> Result<()> {
        self.inner.drop().await?;
        Ok(())
    }
}
