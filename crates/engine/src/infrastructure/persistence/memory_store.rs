//! In-memory document store.
//!
//! Backed by a `DashMap`; every mutation runs while holding the entry's shard lock, which is
//! what makes `increment_field` and conditional updates atomic.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;

use crate::infrastructure::ports::{
    document_id, Collection, Document, DocumentStore, Filter, Precondition, RepoError,
};

struct Stored {
    /// Insertion sequence, for ordered scans.
    seq: u64,
    doc: Document,
}

#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: DashMap<(Collection, String), Stored>,
    next_seq: AtomicU64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, RepoError> {
        Ok(self
            .docs
            .get(&(collection, id.to_string()))
            .map(|stored| stored.doc.clone()))
    }

    async fn find_all(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, RepoError> {
        let mut matches: Vec<(u64, Document)> = self
            .docs
            .iter()
            .filter(|entry| entry.key().0 == collection && filter.matches(&entry.value().doc))
            .map(|entry| (entry.value().seq, entry.value().doc.clone()))
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);
        Ok(matches.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn insert(&self, collection: Collection, doc: &Document) -> Result<(), RepoError> {
        let id = document_id(doc)?;
        match self.docs.entry((collection, id.to_string())) {
            Entry::Occupied(_) => Err(RepoError::conflict(format!(
                "{} '{}' already exists",
                collection, id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Stored {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    doc: doc.clone(),
                });
                Ok(())
            }
        }
    }

    async fn update_fields(
        &self,
        collection: Collection,
        id: &str,
        fields: &Document,
        precondition: Option<&Precondition>,
    ) -> Result<u64, RepoError> {
        let Some(mut stored) = self.docs.get_mut(&(collection, id.to_string())) else {
            return Ok(0);
        };
        if precondition.is_some_and(|pre| !pre.holds(&stored.doc)) {
            return Ok(0);
        }
        for (field, value) in fields {
            stored.doc.insert(field.clone(), value.clone());
        }
        Ok(1)
    }

    async fn increment_field(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: i64,
        floor: Option<i64>,
    ) -> Result<u64, RepoError> {
        let Some(mut stored) = self.docs.get_mut(&(collection, id.to_string())) else {
            return Ok(0);
        };
        let current = match stored.doc.get(field) {
            None | Some(Value::Null) => 0,
            Some(value) => value.as_i64().ok_or_else(|| {
                RepoError::serialization(format!("{} is not an integer", field))
            })?,
        };
        let Some(next) = current.checked_add(delta) else {
            return Ok(0);
        };
        if floor.is_some_and(|floor| next < floor) {
            return Ok(0);
        }
        stored.doc.insert(field.to_string(), Value::from(next));
        Ok(1)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<u64, RepoError> {
        Ok(u64::from(
            self.docs.remove(&(collection, id.to_string())).is_some(),
        ))
    }
}
