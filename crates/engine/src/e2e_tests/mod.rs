//! Backend end-to-end scenarios.
//!
//! These tests drive the fully wired [`App`](crate::app::App) (real use cases, real
//! repositories) over a document store:
//! - In-memory store for the ledger, statistics and user flows
//! - File-backed SQLite (in a temp dir) for the persistence round trip
//!
//! # Running
//!
//! ```bash
//! cargo test -p pokerledger-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod ledger_flow_tests;
mod sqlite_flow_tests;

pub use e2e_helpers::*;
