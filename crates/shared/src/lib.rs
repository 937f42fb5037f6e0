//! PokerLedger Shared - wire types for the REST boundary
//!
//! This crate contains the JSON shapes exchanged with clients:
//! - Request bodies per resource (games, users, global statistics)
//! - Response DTOs for every resource
//! - The `{ message, data }` success envelope and the `{ code, message }` error body
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde, serde_json, rust_decimal and chrono
//! 2. **No business logic** - pure data types and serialization
//! 3. **No domain types** - ids are plain strings; the engine converts at the edge
//! 4. **Lenient requests** - required request fields are `Option`s so the engine can report
//!    exactly which field is missing instead of a generic deserialization failure

pub mod dto;
pub mod requests;
pub mod responses;

pub use dto::{
    FavPlayerDto, GameDebtDto, GameDto, GamePlayerDto, GlobalStatsDto, PrincipalDto, UserDto,
};
pub use requests::{
    AddFavPlayerRequest, AdminUpdateUserRequest, CreateGameRequest, CreateUserRequest,
    DebtChanges, DebtInput, FavPlayerChanges, IncrementStatRequest, LoginRequest, PlayerChanges,
    PlayerInput, RemoveDebtRequest, RemoveFavPlayerRequest, RemovePlayerRequest,
    ReplaceStatsRequest, ResolveGameRequest, UpdateDebtRequest, UpdateEmailRequest,
    UpdateFavPlayerRequest, UpdateGameRequest, UpdatePasswordRequest, UpdatePlayerRequest,
    UpdateUsernameRequest,
};
pub use responses::{ApiResponse, ErrorCode, ErrorResponse};
