//! PokerLedger domain
//!
//! Pure, synchronous ledger logic. Nothing in this crate performs I/O: the engine loads an
//! aggregate through its ports, mutates it here and persists the result.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{Game, GameChanges, User};
pub use entities::{
    DebtUpdate, FavPlayer, FavPlayerUpdate, GameDebt, GamePlayer, GlobalStats, PlayerUpdate,
    StatField, UserStatistics, GLOBAL_STATS_ID,
};
pub use error::DomainError;
pub use events::{LifecycleEvent, ResolutionChange, StatDelta};
pub use ids::{GameId, UserId};
pub use value_objects::{Email, GameLabel, Money, PaymentType, PlayerName, UserRole, Username};
