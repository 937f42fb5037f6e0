//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns lifecycle information from mutations instead of touching other aggregates
//!
//! | Aggregate | Owns |
//! |-----------|------|
//! | `Game` | `GamePlayer`s, `GameDebt`s, resolution state |
//! | `User` | credentials, `FavPlayer`s, `UserStatistics` |

pub mod game;
pub mod user;

pub use game::{Game, GameChanges};
pub use user::User;
