//! Repository port traits, one per aggregate.

use async_trait::async_trait;
use pokerledger_domain::{Email, Game, GameId, GlobalStats, StatField, User, UserId};

use super::error::RepoError;

// =============================================================================
// Games
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepo: Send + Sync {
    async fn get(&self, id: &GameId) -> Result<Option<Game>, RepoError>;
    async fn list_all(&self) -> Result<Vec<Game>, RepoError>;
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Game>, RepoError>;

    /// Store a new game. Returns the stored revision.
    ///
    /// # Errors
    ///
    /// `RepoError::Conflict` if the id is taken.
    async fn insert(&self, game: &Game) -> Result<u64, RepoError>;

    /// Write back a loaded game, provided nobody saved it since it was loaded. Returns the
    /// new revision.
    ///
    /// # Errors
    ///
    /// - `RepoError::NotFound` if the game no longer exists
    /// - `RepoError::Conflict` if the stored revision moved on
    async fn save(&self, game: &Game) -> Result<u64, RepoError>;

    /// Returns whether a game was deleted.
    async fn delete(&self, id: &GameId) -> Result<bool, RepoError>;
}

// =============================================================================
// Users
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get(&self, id: &UserId) -> Result<Option<User>, RepoError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepoError>;
    async fn list_all(&self) -> Result<Vec<User>, RepoError>;

    /// # Errors
    ///
    /// `RepoError::Conflict` if the id is taken.
    async fn insert(&self, user: &User) -> Result<(), RepoError>;

    /// # Errors
    ///
    /// `RepoError::NotFound` if the user no longer exists.
    async fn save(&self, user: &User) -> Result<(), RepoError>;

    async fn delete(&self, id: &UserId) -> Result<bool, RepoError>;
}

// =============================================================================
// Global statistics
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepo: Send + Sync {
    async fn get(&self) -> Result<Option<GlobalStats>, RepoError>;

    /// # Errors
    ///
    /// `RepoError::Conflict` if the singleton already exists.
    async fn create(&self, stats: &GlobalStats) -> Result<(), RepoError>;

    /// Atomic add-in-place that never takes a counter below zero.
    ///
    /// Returns `false` when nothing was written: the singleton is missing or the result
    /// would be negative.
    async fn increment(&self, field: StatField, delta: i64) -> Result<bool, RepoError>;

    /// Overwrite all counters, creating the singleton if needed.
    async fn put(&self, stats: &GlobalStats) -> Result<(), RepoError>;
}
