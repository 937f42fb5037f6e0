//! The ledger flow against a SQLite file, including a reopen.

use pokerledger_domain::{Money, PlayerUpdate, UserId, UserRole};
use tempfile::TempDir;

use super::*;
use crate::use_cases::Principal;

#[tokio::test]
async fn ledger_survives_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    {
        let app = sqlite_app(&dir).await;
        seed_game(&app, "g1", &[("Alice", 100), ("Bob", 50)]).await;
        app.use_cases
            .games
            .ledger
            .update_player(
                &owner(),
                &gid("g1"),
                &name("Bob"),
                PlayerUpdate {
                    cash_out: Some(Money::from_units(20)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        app.use_cases
            .games
            .ledger
            .add_debt(&owner(), &gid("g1"), debt("Bob", "Alice", 30))
            .await
            .unwrap();
        app.use_cases
            .games
            .resolve
            .execute(&owner(), &gid("g1"), "Bob pays Alice 30".into())
            .await
            .unwrap();
    }

    let app = sqlite_app(&dir).await;
    let game = app.use_cases.games.query.get(&owner(), &gid("g1")).await.unwrap();

    assert_eq!(game.total_cash_on_table(), Money::from_units(150));
    assert_eq!(game.player(&name("Bob")).unwrap().cash_out(), Money::from_units(20));
    assert_eq!(game.debts(), [debt("Bob", "Alice", 30)]);
    assert!(game.is_resolved());

    let stats = global(&app).await;
    assert_eq!(stats.total_games_recorded, 1);
    assert_eq!(stats.total_problems_solved, 1);
}

#[tokio::test]
async fn owner_listing_only_shows_own_games() {
    let dir = TempDir::new().unwrap();
    let app = sqlite_app(&dir).await;
    seed_game(&app, "g1", &[]).await;
    seed_game(&app, "g2", &[]).await;

    let mine = app.use_cases.games.query.list_visible(&owner()).await.unwrap();
    assert_eq!(mine.len(), 2);

    let someone_else = Principal::new(UserId::new("u2").unwrap(), UserRole::User);
    let theirs = app
        .use_cases
        .games
        .query
        .list_visible(&someone_else)
        .await
        .unwrap();
    assert!(theirs.is_empty());

    let all = app.use_cases.games.query.list_visible(&admin()).await.unwrap();
    assert_eq!(all.len(), 2);
}
