//! Typed views of server replies
//!
//! Diagnostics types keep fields they do not model in `extra`, so a report
//! can be printed back out without losing engine-specific details.

use std::time::Duration;

use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

use super::Document;

/// Reply to the `explain` command
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainReport {
    /// Planner output, left opaque
    #[serde(default)]
    pub query_planner: Document,
    pub execution_stats: ExecutionStats,
}

impl ExplainReport {
    /// Name of the root stage of the winning plan, e.g. `COLLSCAN`.
    pub fn winning_stage(&self) -> &str {
        &self.execution_stats.execution_stages.stage
    }
}

/// The `executionStats` section of an explain report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    #[serde(default)]
    pub execution_success: bool,
    #[serde(default)]
    pub n_returned: u64,
    #[serde(default)]
    pub execution_time_millis: u64,
    #[serde(default)]
    pub total_keys_examined: u64,
    #[serde(default)]
    pub total_docs_examined: u64,
    pub execution_stages: ExecutionStage,
    #[serde(flatten)]
    pub extra: Document,
}

/// One node of the executed plan tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStage {
    pub stage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_returned: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_stage: Option<Box<ExecutionStage>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_stages: Vec<ExecutionStage>,
    #[serde(flatten)]
    pub extra: Document,
}

impl ExecutionStage {
    /// Visits this stage and every stage below it, depth first.
    pub fn walk(&self) -> Vec<&ExecutionStage> {
        let mut out = vec![self];
        if let Some(input) = &self.input_stage {
            out.extend(input.walk());
        }
        for input in &self.input_stages {
            out.extend(input.walk());
        }
        out
    }

    /// True if any stage scanned an index.
    pub fn used_index(&self) -> bool {
        self.walk().iter().any(|s| s.stage == "IXSCAN")
    }

    /// True if any stage scanned the whole collection.
    pub fn is_collection_scan(&self) -> bool {
        self.walk().iter().any(|s| s.stage == "COLLSCAN")
    }

    /// Names of the indexes the plan used.
    pub fn index_names(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter_map(|s| s.index_name.as_deref())
            .collect()
    }
}

/// An index as described by `listIndexes`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    pub name: String,
    pub key: Document,
    pub expire_after_seconds: Option<u64>,
}

impl IndexInfo {
    /// True for TTL indexes.
    pub fn is_ttl(&self) -> bool {
        self.expire_after_seconds.is_some()
    }
}

impl From<IndexModel> for IndexInfo {
    fn from(model: IndexModel) -> Self {
        let (name, expire_after_seconds) = match model.options {
            Some(options) => (
                options.name.unwrap_or_default(),
                options.expire_after.as_ref().map(Duration::as_secs),
            ),
            None => (String::new(), None),
        };
        Self {
            name,
            key: model.keys,
            expire_after_seconds,
        }
    }
}
