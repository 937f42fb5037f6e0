//! API layer - HTTP entry points.

pub mod auth;
pub mod convert;
pub mod error;
pub mod games;
pub mod global;
pub mod http;
pub mod users;

pub use error::ApiError;
