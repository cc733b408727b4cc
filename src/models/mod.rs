//! Command and reply models for the database server
//!
//! This module defines the commands sent to MongoDB and the typed views of
//! the replies we read back.

pub mod requests;
pub mod responses;

/// A BSON document as stored by the server.
pub type Document = mongodb::bson::Document;

// Re-export commonly used types
pub use requests::{explain_find_command, Namespace, EXPLAIN_VERBOSITY};
pub use responses::{ExecutionStage, ExecutionStats, ExplainReport, IndexInfo};
