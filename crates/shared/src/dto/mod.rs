//! Response DTOs

mod game;
mod stats;
mod user;

pub use game::{GameDebtDto, GameDto, GamePlayerDto};
pub use stats::GlobalStatsDto;
pub use user::{FavPlayerDto, PrincipalDto, UserDto};
