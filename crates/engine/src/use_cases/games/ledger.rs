//! Player and debt edits on a single game.
//!
//! Ledger edits never change the resolution state, so they carry no statistics effect.

use std::sync::Arc;

use pokerledger_domain::{DebtUpdate, Game, GameDebt, GameId, GamePlayer, PlayerName, PlayerUpdate};

use super::{load_accessible, save, GameError};
use crate::infrastructure::ports::GameRepo;
use crate::use_cases::access::Principal;

pub struct LedgerOps {
    games: Arc<dyn GameRepo>,
}

fn debt_key(debtor: &PlayerName, creditor: &PlayerName) -> String {
    format!("{} -> {}", debtor, creditor)
}

impl LedgerOps {
    pub fn new(games: Arc<dyn GameRepo>) -> Self {
        Self { games }
    }

    // =========================================================================
    // Players
    // =========================================================================

    pub async fn add_player(
        &self,
        principal: &Principal,
        id: &GameId,
        player: GamePlayer,
    ) -> Result<Game, GameError> {
        let mut game = load_accessible(&self.games, principal, id).await?;
        game.add_player(player)?;
        save(&self.games, game).await
    }

    /// # Errors
    ///
    /// `GameError::NotFound` if no player has that name.
    pub async fn update_player(
        &self,
        principal: &Principal,
        id: &GameId,
        name: &PlayerName,
        update: PlayerUpdate,
    ) -> Result<Game, GameError> {
        let mut game = load_accessible(&self.games, principal, id).await?;
        if game.update_player(name, update)?.is_none() {
            return Err(GameError::not_found("Player", name));
        }
        save(&self.games, game).await
    }

    /// # Errors
    ///
    /// `GameError::NotFound` if no player has that name.
    pub async fn remove_player(
        &self,
        principal: &Principal,
        id: &GameId,
        name: &PlayerName,
    ) -> Result<Game, GameError> {
        let mut game = load_accessible(&self.games, principal, id).await?;
        if game.remove_player(name) == 0 {
            return Err(GameError::not_found("Player", name));
        }
        save(&self.games, game).await
    }

    // =========================================================================
    // Debts
    // =========================================================================

    pub async fn add_debt(
        &self,
        principal: &Principal,
        id: &GameId,
        debt: GameDebt,
    ) -> Result<Game, GameError> {
        let mut game = load_accessible(&self.games, principal, id).await?;
        game.add_debt(debt)?;
        save(&self.games, game).await
    }

    /// # Errors
    ///
    /// `GameError::NotFound` if `debtor` owes nothing to `creditor`.
    pub async fn update_debt(
        &self,
        principal: &Principal,
        id: &GameId,
        debtor: &PlayerName,
        creditor: &PlayerName,
        update: DebtUpdate,
    ) -> Result<Game, GameError> {
        let mut game = load_accessible(&self.games, principal, id).await?;
        if game.update_debt(debtor, creditor, update)?.is_none() {
            return Err(GameError::not_found("Debt", debt_key(debtor, creditor)));
        }
        save(&self.games, game).await
    }

    /// # Errors
    ///
    /// `GameError::NotFound` if `debtor` owes nothing to `creditor`.
    pub async fn remove_debt(
        &self,
        principal: &Principal,
        id: &GameId,
        debtor: &PlayerName,
        creditor: &PlayerName,
    ) -> Result<Game, GameError> {
        let mut game = load_accessible(&self.games, principal, id).await?;
        if game.remove_debt(debtor, creditor) == 0 {
            return Err(GameError::not_found("Debt", debt_key(debtor, creditor)));
        }
        save(&self.games, game).await
    }
}

#[cfg(test)]
mod tests {
    use pokerledger_domain::{DomainError, Money, PaymentType};
    use rust_decimal::Decimal;

    use super::super::test_support::*;
    use super::*;
    use crate::infrastructure::ports::{MockGameRepo, RepoError};

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s).unwrap()
    }

    fn debt(debtor: &str, creditor: &str, amount: u32) -> GameDebt {
        GameDebt::new(
            name(debtor),
            name(creditor),
            Money::from_units(amount),
            PaymentType::default(),
        )
        .unwrap()
    }

    /// Repo serving `game` and accepting one save.
    fn repo_with(game: Game) -> MockGameRepo {
        let mut repo = MockGameRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(game.clone())));
        repo.expect_save().returning(|g| Ok(g.revision() + 1));
        repo
    }

    #[tokio::test]
    async fn add_player_updates_total() {
        let game = stored_game().with_players(vec![player("Alice", 100)]);
        let ops = LedgerOps::new(Arc::new(repo_with(game)));

        let game = ops
            .add_player(&principal("u1"), &game_id(), player("Bob", 50))
            .await
            .unwrap();

        assert_eq!(game.players().len(), 2);
        assert_eq!(game.total_cash_on_table(), Money::from_units(150));
        assert_eq!(game.revision(), 2);
    }

    #[tokio::test]
    async fn duplicate_player_is_rejected() {
        let mut repo = MockGameRepo::new();
        let game = stored_game().with_players(vec![player("Alice", 100)]);
        repo.expect_get().returning(move |_| Ok(Some(game.clone())));
        repo.expect_save().never();

        let err = LedgerOps::new(Arc::new(repo))
            .add_player(&principal("u1"), &game_id(), player("Alice", 20))
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::Domain(DomainError::Constraint(_))));
    }

    #[tokio::test]
    async fn update_player_recomputes_profit_loss() {
        let game = stored_game().with_players(vec![player("Alice", 100)]);
        let ops = LedgerOps::new(Arc::new(repo_with(game)));

        let update = PlayerUpdate {
            cash_out: Some(Money::from_units(180)),
            ..Default::default()
        };
        let game = ops
            .update_player(&principal("u1"), &game_id(), &name("Alice"), update)
            .await
            .unwrap();

        assert_eq!(game.players()[0].profit_loss(), Decimal::from(80));
    }

    #[tokio::test]
    async fn update_missing_player_is_not_found() {
        let mut repo = MockGameRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored_game())));
        repo.expect_save().never();

        let err = LedgerOps::new(Arc::new(repo))
            .update_player(
                &principal("u1"),
                &game_id(),
                &name("Zed"),
                PlayerUpdate::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::NotFound { entity_type: "Player", .. }));
    }

    #[tokio::test]
    async fn remove_player_leaves_the_rest() {
        let game = stored_game().with_players(vec![player("Alice", 100), player("Bob", 50)]);
        let ops = LedgerOps::new(Arc::new(repo_with(game)));

        let game = ops
            .remove_player(&principal("u1"), &game_id(), &name("Alice"))
            .await
            .unwrap();

        assert_eq!(game.players(), &[player("Bob", 50)]);
        assert_eq!(game.total_cash_on_table(), Money::from_units(50));
    }

    #[tokio::test]
    async fn reverse_debt_is_a_constraint_violation() {
        let game = stored_game().with_debts(vec![debt("Alice", "Bob", 30)]);
        let ops = LedgerOps::new(Arc::new(repo_with(game)));

        let err = ops
            .add_debt(&principal("u1"), &game_id(), debt("Bob", "Alice", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::Domain(DomainError::Constraint(_))));
    }

    #[tokio::test]
    async fn update_debt_merges_amount() {
        let game = stored_game().with_debts(vec![debt("Alice", "Bob", 30)]);
        let ops = LedgerOps::new(Arc::new(repo_with(game)));

        let update = DebtUpdate {
            amount: Some(Money::from_units(45)),
            payment_type: None,
        };
        let game = ops
            .update_debt(&principal("u1"), &game_id(), &name("Alice"), &name("Bob"), update)
            .await
            .unwrap();

        assert_eq!(game.debts()[0].amount(), Money::from_units(45));
        assert_eq!(game.debts()[0].payment_type().as_str(), "BIT");
    }

    #[tokio::test]
    async fn remove_debt_is_directional() {
        let mut repo = MockGameRepo::new();
        let game = stored_game().with_debts(vec![debt("Alice", "Bob", 30)]);
        repo.expect_get().returning(move |_| Ok(Some(game.clone())));
        repo.expect_save().never();

        let err = LedgerOps::new(Arc::new(repo))
            .remove_debt(&principal("u1"), &game_id(), &name("Bob"), &name("Alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::NotFound { entity_type: "Debt", .. }));
    }

    #[tokio::test]
    async fn concurrent_edit_surfaces_conflict() {
        let mut repo = MockGameRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored_game())));
        repo.expect_save()
            .returning(|_| Err(RepoError::conflict("game g1 was modified concurrently")));

        let err = LedgerOps::new(Arc::new(repo))
            .add_player(&principal("u1"), &game_id(), player("Alice", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::Repo(RepoError::Conflict(_))));
    }
}
