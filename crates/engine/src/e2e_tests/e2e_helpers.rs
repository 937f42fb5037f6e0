//! Helpers for building the full application stack in tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pokerledger_domain::{
    GameDebt, GameId, GameLabel, GamePlayer, GlobalStats, Money, PaymentType, PlayerName, UserId,
    UserRole,
};
use tempfile::TempDir;

use crate::app::App;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::password::Argon2Hasher;
use crate::infrastructure::persistence::{MemoryDocumentStore, SqliteDocumentStore};
use crate::infrastructure::ports::DocumentStore;
use crate::use_cases::games::NewGame;
use crate::use_cases::Principal;

pub const PASSWORD_MIN_LENGTH: usize = 5;

fn build(store: Arc<dyn DocumentStore>) -> App {
    App::new(
        store,
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 14, 20, 0, 0).unwrap())),
        Arc::new(Argon2Hasher::new()),
        PASSWORD_MIN_LENGTH,
    )
}

/// App over a fresh in-memory document store.
pub fn memory_app() -> App {
    build(Arc::new(MemoryDocumentStore::new()))
}

/// App over a SQLite database file inside `dir`.
pub async fn sqlite_app(dir: &TempDir) -> App {
    let url = format!("sqlite://{}", dir.path().join("pokerledger.db").display());
    let store = SqliteDocumentStore::connect(&url)
        .await
        .expect("open SQLite document store");
    build(Arc::new(store))
}

/// The regular user `u1`.
pub fn owner() -> Principal {
    Principal::new(UserId::new("u1").unwrap(), UserRole::User)
}

pub fn admin() -> Principal {
    Principal::new(UserId::new("root").unwrap(), UserRole::Admin)
}

pub fn gid(id: &str) -> GameId {
    GameId::new(id).unwrap()
}

pub fn name(name: &str) -> PlayerName {
    PlayerName::new(name).unwrap()
}

/// `{_id: id, userID: "u1", userGameID: 1, type: "cash", location: "home"}`
pub fn cash_game(id: &str) -> NewGame {
    NewGame {
        id: gid(id),
        owner: Some(UserId::new("u1").unwrap()),
        user_game_id: 1,
        game_type: GameLabel::new("cash").unwrap(),
        location: GameLabel::new("home").unwrap(),
        user_note: None,
        game_string: None,
        players: Vec::new(),
        debts: Vec::new(),
    }
}

pub fn player(player_name: &str, buy_in: u32) -> GamePlayer {
    GamePlayer::new(name(player_name), Money::from_units(buy_in))
}

pub fn debt(debtor: &str, creditor: &str, amount: u32) -> GameDebt {
    GameDebt::new(
        name(debtor),
        name(creditor),
        Money::from_units(amount),
        PaymentType::default(),
    )
    .unwrap()
}

pub async fn global(app: &App) -> GlobalStats {
    app.use_cases.stats.get().await.unwrap()
}

/// Create `id` as `u1` and seat the given players.
pub async fn seed_game(app: &App, id: &str, players: &[(&str, u32)]) {
    app.use_cases
        .games
        .create
        .execute(&owner(), cash_game(id))
        .await
        .unwrap();
    for (player_name, buy_in) in players {
        app.use_cases
            .games
            .ledger
            .add_player(&owner(), &gid(id), player(player_name, *buy_in))
            .await
            .unwrap();
    }
}
