//! Global statistics counter.
//!
//! The counters live in one singleton document. Adjustments go through the store's atomic
//! increment, never read-then-write; reads bootstrap the singleton on first use.

use std::sync::Arc;

use pokerledger_domain::{DomainError, GlobalStats, StatField, GLOBAL_STATS_ID};

use crate::infrastructure::ports::{RepoError, StatsRepo};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("{field} cannot go below zero")]
    WouldGoNegative { field: StatField },
    #[error("{field} cannot grow any further")]
    WouldOverflow { field: StatField },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct StatsCounter {
    repo: Arc<dyn StatsRepo>,
}

impl StatsCounter {
    pub fn new(repo: Arc<dyn StatsRepo>) -> Self {
        Self { repo }
    }

    /// Current counters, creating the all-zero singleton if it does not exist yet.
    pub async fn get(&self) -> Result<GlobalStats, StatsError> {
        if let Some(stats) = self.repo.get().await? {
            return Ok(stats);
        }
        self.bootstrap().await?;
        Ok(self.repo.get().await?.unwrap_or_default())
    }

    /// Adjust a counter named by its wire name. Returns the counters afterwards.
    ///
    /// # Errors
    ///
    /// - `StatsError::Domain` for an unknown field name; storage is not touched
    /// - `StatsError::WouldGoNegative` if the adjustment would take the counter below zero
    /// - `StatsError::WouldOverflow` if it would take the counter past the integer range
    pub async fn increment_field(
        &self,
        field_name: &str,
        delta: i64,
    ) -> Result<GlobalStats, StatsError> {
        let field: StatField = field_name.parse()?;
        self.apply(field, delta).await?;
        self.get().await
    }

    /// Atomic add-in-place on one counter.
    ///
    /// The one repeated write in the core: when the singleton does not exist yet, it is
    /// created and the increment issued once more. The first attempt matched no document and
    /// wrote nothing, so the delta is still applied exactly once.
    pub async fn apply(&self, field: StatField, delta: i64) -> Result<(), StatsError> {
        if self.repo.increment(field, delta).await? {
            return Ok(());
        }

        // Nothing written: the singleton is missing, or the result was out of range.
        if self.repo.get().await?.is_some() {
            return Err(Self::out_of_range(field, delta));
        }
        self.bootstrap().await?;
        if self.repo.increment(field, delta).await? {
            Ok(())
        } else {
            Err(Self::out_of_range(field, delta))
        }
    }

    fn out_of_range(field: StatField, delta: i64) -> StatsError {
        if delta < 0 {
            StatsError::WouldGoNegative { field }
        } else {
            StatsError::WouldOverflow { field }
        }
    }

    /// Overwrite every counter.
    ///
    /// # Errors
    ///
    /// `StatsError::Domain` if the document id is not the singleton's, or any counter is
    /// missing or negative. Nothing is written in that case.
    pub async fn replace(
        &self,
        document_id: Option<&str>,
        games_recorded: Option<i64>,
        problems_solved: Option<i64>,
        total_users: Option<i64>,
    ) -> Result<GlobalStats, StatsError> {
        if document_id.is_some_and(|id| id != GLOBAL_STATS_ID) {
            return Err(DomainError::validation("Cannot change global document ID").into());
        }
        let stats = GlobalStats::from_counts(games_recorded, problems_solved, total_users)?;
        self.repo.put(&stats).await?;
        Ok(stats)
    }

    pub async fn reset(&self) -> Result<GlobalStats, StatsError> {
        let stats = GlobalStats::zero();
        self.repo.put(&stats).await?;
        Ok(stats)
    }

    async fn bootstrap(&self) -> Result<(), StatsError> {
        match self.repo.create(&GlobalStats::zero()).await {
            Ok(()) => {
                tracing::info!("Created global statistics document");
                Ok(())
            }
            // A concurrent first call created it; the values are zero either way.
            Err(e) if e.is_conflict() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
