//! Request bodies, one module per resource.

mod game;
mod stats;
mod user;

pub use game::{
    CreateGameRequest, DebtChanges, DebtInput, PlayerChanges, PlayerInput, RemoveDebtRequest,
    RemovePlayerRequest, ResolveGameRequest, UpdateDebtRequest, UpdateGameRequest,
    UpdatePlayerRequest,
};
pub use stats::{IncrementStatRequest, ReplaceStatsRequest};
pub use user::{
    AddFavPlayerRequest, AdminUpdateUserRequest, CreateUserRequest, FavPlayerChanges,
    LoginRequest, RemoveFavPlayerRequest, UpdateEmailRequest, UpdateFavPlayerRequest,
    UpdatePasswordRequest, UpdateUsernameRequest,
};
