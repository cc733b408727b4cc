//! Commands sent to the database server
//!
//! Most operations go through the driver's typed API. Explain has no typed
//! helper, so it is issued as a raw command.

use std::fmt;

use mongodb::bson::doc;

use super::Document;
use crate::db::Filter;

/// Verbosity requested from `explain`; execution statistics are required
/// for an [`ExplainReport`](super::ExplainReport) to decode.
pub const EXPLAIN_VERBOSITY: &str = "executionStats";

/// Database and collection an operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub database: String,
    pub collection: String,
}

impl Namespace {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// Builds `{explain: {find, filter}, verbosity: "executionStats"}`.
pub fn explain_find_command(namespace: &Namespace, filter: &Filter) -> Document {
    doc! {
        "explain": {
            "find": namespace.collection.as_str(),
            "filter": filter.as_document().clone(),
        },
        "verbosity": EXPLAIN_VERBOSITY,
    }
}
