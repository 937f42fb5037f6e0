//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::AppConfig,
    password::Argon2Hasher,
    persistence::{
        DocumentGameRepo, DocumentStatsRepo, DocumentUserRepo, MemoryDocumentStore,
        SqliteDocumentStore,
    },
    ports::{ClockPort, DocumentStore, GameRepo, PasswordHasherPort, RepoError, StatsRepo, UserRepo},
};
use crate::use_cases::{
    self,
    games::{CreateGame, DeleteGame, GameQueries, LedgerOps, ResolveGame, UpdateGame},
    users::{CreateUser, DeleteUser, FavPlayerOps, Login, UserProfile},
    LifecycleEffects, StatsCounter,
};

/// Main application state.
///
/// Holds the repositories and use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for the repository ports, all backed by the same document store.
pub struct Repositories {
    pub games: Arc<dyn GameRepo>,
    pub users: Arc<dyn UserRepo>,
    pub stats: Arc<dyn StatsRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub games: use_cases::GameUseCases,
    pub users: use_cases::UserUseCases,
    pub stats: Arc<StatsCounter>,
}

impl App {
    /// Connect the configured document store and wire the system clock and Argon2 hasher.
    pub async fn from_config(config: &AppConfig) -> Result<Self, RepoError> {
        let store: Arc<dyn DocumentStore> = if config.uses_memory_store() {
            tracing::warn!("Using the in-memory document store; data is lost on restart");
            Arc::new(MemoryDocumentStore::new())
        } else {
            tracing::info!(url = %config.database_url, "Opening SQLite document store");
            Arc::new(SqliteDocumentStore::connect(&config.database_url).await?)
        };

        Ok(Self::new(
            store,
            Arc::new(SystemClock::new()),
            Arc::new(Argon2Hasher::new()),
            config.password_min_length,
        ))
    }

    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn ClockPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        password_min_length: usize,
    ) -> Self {
        let repositories = Repositories {
            games: Arc::new(DocumentGameRepo::new(store.clone())),
            users: Arc::new(DocumentUserRepo::new(store.clone())),
            stats: Arc::new(DocumentStatsRepo::new(store)),
        };

        let stats = Arc::new(StatsCounter::new(repositories.stats.clone()));
        let effects = Arc::new(LifecycleEffects::new(stats.clone()));

        let games = use_cases::GameUseCases::new(
            CreateGame::new(repositories.games.clone(), effects.clone(), clock.clone()),
            GameQueries::new(repositories.games.clone()),
            LedgerOps::new(repositories.games.clone()),
            UpdateGame::new(repositories.games.clone(), effects.clone()),
            ResolveGame::new(repositories.games.clone(), effects.clone()),
            DeleteGame::new(repositories.games.clone(), effects.clone()),
        );

        let users = use_cases::UserUseCases::new(
            CreateUser::new(
                repositories.users.clone(),
                hasher.clone(),
                effects.clone(),
                clock.clone(),
                password_min_length,
            ),
            Login::new(repositories.users.clone(), hasher.clone()),
            UserProfile::new(repositories.users.clone(), hasher, password_min_length),
            DeleteUser::new(repositories.users.clone(), effects),
            FavPlayerOps::new(repositories.users.clone(), clock),
        );

        Self {
            repositories,
            use_cases: UseCases {
                games,
                users,
                stats,
            },
        }
    }
}
