//! Document persistence adapters
//!
//! Two interchangeable `DocumentStore` backends (SQLite for deployments, in-memory for
//! tests and ephemeral runs) and the typed repositories that map aggregates onto
//! documents.

mod game_repo;
mod memory_store;
mod records;
mod sqlite_store;
mod stats_repo;
mod user_repo;

pub use game_repo::DocumentGameRepo;
pub use memory_store::MemoryDocumentStore;
pub use sqlite_store::SqliteDocumentStore;
pub use stats_repo::DocumentStatsRepo;
pub use user_repo::DocumentUserRepo;
