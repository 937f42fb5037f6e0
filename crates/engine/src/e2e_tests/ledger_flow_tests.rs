//! Game ledger scenarios.

use pokerledger_domain::{GameChanges, Money, PlayerUpdate};
use rust_decimal::Decimal;

use super::*;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::GameError;

#[tokio::test]
async fn total_cash_is_sum_of_buy_ins() {
    let app = memory_app();
    app.use_cases
        .games
        .create
        .execute(&owner(), cash_game("g1"))
        .await
        .unwrap();

    let game = app
        .use_cases
        .games
        .ledger
        .add_player(&owner(), &gid("g1"), player("Alice", 100))
        .await
        .unwrap();
    assert_eq!(game.players().len(), 1);

    let game = app
        .use_cases
        .games
        .ledger
        .add_player(&owner(), &gid("g1"), player("Bob", 50))
        .await
        .unwrap();
    assert_eq!(game.players().len(), 2);
    assert_eq!(game.total_cash_on_table(), Money::from_units(150));

    let reloaded = app.use_cases.games.query.get(&owner(), &gid("g1")).await.unwrap();
    assert_eq!(reloaded.total_cash_on_table(), Money::from_units(150));
}

#[tokio::test]
async fn removing_a_player_recomputes_total() {
    let app = memory_app();
    seed_game(&app, "g1", &[("Alice", 100), ("Bob", 50)]).await;

    let game = app
        .use_cases
        .games
        .ledger
        .remove_player(&owner(), &gid("g1"), &name("Alice"))
        .await
        .unwrap();

    let names: Vec<_> = game.players().iter().map(|p| p.name().as_str()).collect();
    assert_eq!(names, ["Bob"]);
    assert_eq!(game.players()[0].buy_in(), Money::from_units(50));
    assert_eq!(game.total_cash_on_table(), Money::from_units(50));
}

#[tokio::test]
async fn player_update_keeps_profit_loss_consistent() {
    let app = memory_app();
    seed_game(&app, "g1", &[("Alice", 100)]).await;

    let update = PlayerUpdate {
        cash_out: Some(Money::from_units(175)),
        ..Default::default()
    };
    let game = app
        .use_cases
        .games
        .ledger
        .update_player(&owner(), &gid("g1"), &name("Alice"), update)
        .await
        .unwrap();

    let alice = game.player(&name("Alice")).unwrap();
    assert_eq!(alice.profit_loss(), Decimal::from(75));
    assert_eq!(
        alice.profit_loss(),
        alice.cash_out().amount() - alice.buy_in().amount()
    );
}

#[tokio::test]
async fn add_then_remove_debt_restores_debts() {
    let app = memory_app();
    seed_game(&app, "g1", &[("Alice", 100), ("Bob", 50), ("Carol", 20)]).await;
    let ledger = &app.use_cases.games.ledger;

    let before = ledger
        .add_debt(&owner(), &gid("g1"), debt("Carol", "Alice", 10))
        .await
        .unwrap();
    ledger
        .add_debt(&owner(), &gid("g1"), debt("Bob", "Alice", 30))
        .await
        .unwrap();
    let after = ledger
        .remove_debt(&owner(), &gid("g1"), &name("Bob"), &name("Alice"))
        .await
        .unwrap();

    assert_eq!(after.debts(), before.debts());
}

#[tokio::test]
async fn missing_player_or_debt_is_not_found() {
    let app = memory_app();
    seed_game(&app, "g1", &[("Alice", 100)]).await;
    let ledger = &app.use_cases.games.ledger;

    let err = ledger
        .remove_player(&owner(), &gid("g1"), &name("Zed"))
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::NotFound { entity_type: "Player", .. }));

    let err = ledger
        .remove_debt(&owner(), &gid("g1"), &name("Alice"), &name("Zed"))
        .await
        .unwrap_err();
    assert!(matches!(err, GameError::NotFound { entity_type: "Debt", .. }));
}

#[tokio::test]
async fn stale_copy_cannot_overwrite_newer_game() {
    let app = memory_app();
    seed_game(&app, "g1", &[("Alice", 100)]).await;
    let repo = &app.repositories.games;

    let mut first = repo.get(&gid("g1")).await.unwrap().unwrap();
    let mut second = repo.get(&gid("g1")).await.unwrap().unwrap();

    first.add_player(player("Bob", 50)).unwrap();
    repo.save(&first).await.unwrap();

    second.add_player(player("Carol", 20)).unwrap();
    let err = repo.save(&second).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let stored = repo.get(&gid("g1")).await.unwrap().unwrap();
    assert!(stored.player(&name("Bob")).is_some());
    assert!(stored.player(&name("Carol")).is_none());
}

#[tokio::test]
async fn generic_update_replaces_player_list() {
    let app = memory_app();
    seed_game(&app, "g1", &[("Alice", 100), ("Bob", 50)]).await;

    let changes = GameChanges {
        players: Some(vec![player("Dana", 80)]),
        game_string: Some("home game, 1/2 blinds".into()),
        ..Default::default()
    };
    let game = app
        .use_cases
        .games
        .update
        .execute(&owner(), &gid("g1"), changes)
        .await
        .unwrap();

    assert_eq!(game.players().len(), 1);
    assert_eq!(game.total_cash_on_table(), Money::from_units(80));
    assert_eq!(game.game_string(), "home game, 1/2 blinds");
}
