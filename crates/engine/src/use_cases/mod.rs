//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific resource. Use cases load aggregates through
//! the repository ports, apply domain operations and hand lifecycle events to
//! [`lifecycle::LifecycleEffects`] once the primary write succeeded.

pub mod access;
pub mod games;
pub mod lifecycle;
pub mod stats;
pub mod users;

// Re-export main types
pub use access::Principal;
pub use games::{GameError, GameUseCases};
pub use lifecycle::LifecycleEffects;
pub use stats::{StatsCounter, StatsError};
pub use users::{UserError, UserUseCases};
