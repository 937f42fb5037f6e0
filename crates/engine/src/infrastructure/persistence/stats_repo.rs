//! Global statistics repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use pokerledger_domain::{GlobalStats, StatField, GLOBAL_STATS_ID};

use super::records::{from_document, to_document, GlobalStatsRecord};
use crate::infrastructure::ports::{Collection, DocumentStore, RepoError, StatsRepo, ID_FIELD};

/// Counters never go below this.
const COUNTER_FLOOR: i64 = 0;

pub struct DocumentStatsRepo {
    store: Arc<dyn DocumentStore>,
}

impl DocumentStatsRepo {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StatsRepo for DocumentStatsRepo {
    async fn get(&self) -> Result<Option<GlobalStats>, RepoError> {
        self.store
            .find_one(Collection::Global, GLOBAL_STATS_ID)
            .await?
            .map(|doc| from_document::<GlobalStatsRecord>(doc).map(GlobalStats::from))
            .transpose()
    }

    async fn create(&self, stats: &GlobalStats) -> Result<(), RepoError> {
        let doc = to_document(&GlobalStatsRecord::from(stats))?;
        self.store.insert(Collection::Global, &doc).await
    }

    async fn increment(&self, field: StatField, delta: i64) -> Result<bool, RepoError> {
        let modified = self
            .store
            .increment_field(
                Collection::Global,
                GLOBAL_STATS_ID,
                field.as_str(),
                delta,
                Some(COUNTER_FLOOR),
            )
            .await?;
        Ok(modified > 0)
    }

    async fn put(&self, stats: &GlobalStats) -> Result<(), RepoError> {
        let doc = to_document(&GlobalStatsRecord::from(stats))?;
        let mut fields = doc.clone();
        fields.remove(ID_FIELD);

        if self
            .store
            .update_fields(Collection::Global, GLOBAL_STATS_ID, &fields, None)
            .await?
            > 0
        {
            return Ok(());
        }

        match self.store.insert(Collection::Global, &doc).await {
            // Someone created the singleton between our update and insert.
            Err(e) if e.is_conflict() => {
                self.store
                    .update_fields(Collection::Global, GLOBAL_STATS_ID, &fields, None)
                    .await?;
                Ok(())
            }
            other => other,
        }
    }
}
