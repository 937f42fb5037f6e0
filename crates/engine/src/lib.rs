//! PokerLedger Engine library.
//!
//! This crate contains all server-side code for the PokerLedger backend.
//!
//! ## Structure
//!
//! - `use_cases/` - Game ledger, statistics, lifecycle effects and user stories
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end scenarios over the wired application.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
