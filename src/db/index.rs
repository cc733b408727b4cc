//! Index definitions
//!
//! Describes an index for the service to build. A TTL index is a single
//! field index with an expiry; the service is responsible for removing
//! expired documents.

use std::time::Duration;

use mongodb::options::IndexOptions;
use mongodb::IndexModel;

use crate::error::{Error, Result};
use crate::models::Document;

/// Sort direction of an index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Wire value: `1` or `-1`.
    pub fn as_i32(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

/// Index to create on a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    keys: Vec<(String, Direction)>,
    name: Option<String>,
    expire_after_seconds: Option<u64>,
}

impl IndexSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Descending)
    }

    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            keys: vec![(field.into(), direction)],
            name: None,
            expire_after_seconds: None,
        }
    }

    /// Ascending index on a date field whose documents expire after `ttl`.
    pub fn ttl(field: impl Into<String>, ttl: Duration) -> Self {
        Self::ascending(field).expire_after(ttl)
    }

    /// Appends a key, making this a compound index.
    pub fn and(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.keys.push((field.into(), direction));
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whole seconds only; sub-second parts are dropped.
    pub fn expire_after(mut self, ttl: Duration) -> Self {
        self.expire_after_seconds = Some(ttl.as_secs());
        self
    }

    pub fn keys(&self) -> &[(String, Direction)] {
        &self.keys
    }

    pub fn expire_after_seconds(&self) -> Option<u64> {
        self.expire_after_seconds
    }

    /// Explicit name, or the conventional `field_dir` join (e.g. `age_1`).
    pub fn name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .keys
                .iter()
                .map(|(field, dir)| format!("{}_{}", field, dir.as_i32()))
                .collect::<Vec<_>>()
                .join("_"),
        }
    }

    /// Key pattern in declared order, e.g. `{name: 1, age: -1}`.
    pub fn keys_document(&self) -> Document {
        let mut keys = Document::new();
        for (field, direction) in &self.keys {
            keys.insert(field.clone(), direction.as_i32());
        }
        keys
    }

    /// Driver model for `createIndex`.
    pub fn to_model(&self) -> IndexModel {
        let mut options = IndexOptions::default();
        options.name = Some(self.name());
        options.expire_after = self.expire_after_seconds.map(Duration::from_secs);

        IndexModel::builder()
            .keys(self.keys_document())
            .options(options)
            .build()
    }

    /// Rejects empty field names and TTL on compound indexes.
    pub fn validate(&self) -> Result<()> {
        if self.keys.iter().any(|(field, _)| field.is_empty()) {
            return Err(Error::InvalidArgument(
                "Index field name cannot be empty".to_string(),
            ));
        }
        if self.expire_after_seconds.is_some() && self.keys.len() != 1 {
            return Err(Error::InvalidArgument(
                "TTL index must have exactly one field".to_string(),
            ));
        }
        Ok(())
    }
}
