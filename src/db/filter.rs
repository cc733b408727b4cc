//! Equality filters
//!
//! A filter is a document of `field: value` pairs that must all match.

use mongodb::bson::Bson;

use crate::models::Document;

/// Equality filter used by `find` and `explain`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches documents whose `field` equals `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::all().and(field, value)
    }

    /// Adds another equality condition. A repeated field replaces the
    /// earlier value.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Document> for Filter {
    fn from(document: Document) -> Self {
        Self(document)
    }
}
