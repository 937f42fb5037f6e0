//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document persistence (SQLite or in-memory)
//! - Typed repositories over it (mocked in use-case tests)
//! - Password hashing (Argon2)
//! - Clock (for testing)

mod document_store;
mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Persistence Gateway
// =============================================================================
pub use document_store::{
    document_id, Collection, Document, DocumentStore, Filter, Precondition, ID_FIELD,
};

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{GameRepo, StatsRepo, UserRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::PasswordHasherPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockGameRepo, MockStatsRepo, MockUserRepo};

#[cfg(test)]
pub use external::MockPasswordHasherPort;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{PasswordError, RepoError};
