//! Entities owned by an aggregate, plus the global statistics value.

pub mod fav_player;
pub mod game_debt;
pub mod game_player;
pub mod global_stats;
pub mod user_statistics;

pub use fav_player::{FavPlayer, FavPlayerUpdate};
pub use game_debt::{DebtUpdate, GameDebt};
pub use game_player::{GamePlayer, PlayerUpdate};
pub use global_stats::{GlobalStats, StatField, GLOBAL_STATS_ID};
pub use user_statistics::UserStatistics;
