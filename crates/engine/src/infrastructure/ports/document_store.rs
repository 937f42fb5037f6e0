//! Persistence gateway port.
//!
//! A deliberately small document-store contract: JSON objects keyed by `_id` inside a fixed
//! set of collections. No business logic lives behind it; the typed repositories map
//! aggregates onto documents.

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::RepoError;

/// A stored JSON object. Always carries a string `_id`.
pub type Document = Map<String, Value>;

/// Field holding a document's identity.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Games,
    Users,
    Global,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Users => "users",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection for `find_all`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    /// Top-level `field` equals `value`.
    FieldEquals { field: String, value: Value },
}

impl Filter {
    pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::All => true,
            Self::FieldEquals { field, value } => doc.get(field) == Some(value),
        }
    }
}

/// Guard on a conditional update: top-level `field` must currently equal `expected`.
/// An absent field compares equal to `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Precondition {
    pub field: String,
    pub expected: Value,
}

impl Precondition {
    pub fn new(field: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn holds(&self, doc: &Document) -> bool {
        doc.get(&self.field).unwrap_or(&Value::Null) == &self.expected
    }
}

/// Extract the `_id` of a document about to be inserted.
pub fn document_id(doc: &Document) -> Result<&str, RepoError> {
    doc.get(ID_FIELD)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RepoError::serialization("document has no string _id"))
}

/// Document persistence.
///
/// Every call is self-contained: implementations acquire whatever connection they need and
/// release it before returning, on error paths too.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, RepoError>;

    /// Matching documents in insertion order.
    async fn find_all(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, RepoError>;

    /// # Errors
    ///
    /// `RepoError::Conflict` if a document with the same `_id` exists.
    async fn insert(&self, collection: Collection, doc: &Document) -> Result<(), RepoError>;

    /// Set top-level fields, leaving the others untouched. Returns the number of documents
    /// matched (0 when the document is missing or the precondition does not hold).
    async fn update_fields(
        &self,
        collection: Collection,
        id: &str,
        fields: &Document,
        precondition: Option<&Precondition>,
    ) -> Result<u64, RepoError>;

    /// Atomically add `delta` to a numeric top-level field (absent counts as 0).
    ///
    /// With a `floor`, the write only happens when the result stays `>= floor`. A sum that
    /// would overflow `i64` is never written. Returns the number of documents modified.
    async fn increment_field(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: i64,
        floor: Option<i64>,
    ) -> Result<u64, RepoError>;

    async fn delete(&self, collection: Collection, id: &str) -> Result<u64, RepoError>;
}
