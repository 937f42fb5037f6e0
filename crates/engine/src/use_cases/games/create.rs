//! Record a new game.

use std::sync::Arc;

use pokerledger_domain::{Game, GameDebt, GameId, GameLabel, GamePlayer, LifecycleEvent, UserId};

use super::GameError;
use crate::infrastructure::ports::{ClockPort, GameRepo};
use crate::use_cases::access::Principal;
use crate::use_cases::lifecycle::LifecycleEffects;

/// Validated input for a new game.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub id: GameId,
    /// Defaults to the caller.
    pub owner: Option<UserId>,
    pub user_game_id: u32,
    pub game_type: GameLabel,
    pub location: GameLabel,
    pub user_note: Option<String>,
    pub game_string: Option<String>,
    pub players: Vec<GamePlayer>,
    pub debts: Vec<GameDebt>,
}

pub struct CreateGame {
    games: Arc<dyn GameRepo>,
    effects: Arc<LifecycleEffects>,
    clock: Arc<dyn ClockPort>,
}

impl CreateGame {
    pub fn new(
        games: Arc<dyn GameRepo>,
        effects: Arc<LifecycleEffects>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            games,
            effects,
            clock,
        }
    }

    /// # Errors
    ///
    /// - `GameError::Forbidden` if a non-admin creates a game for someone else
    /// - `GameError::Domain` for duplicate players or debts in the initial ledger
    /// - `GameError::Repo` with a conflict if the id is already taken
    pub async fn execute(&self, principal: &Principal, input: NewGame) -> Result<Game, GameError> {
        let owner = input.owner.unwrap_or_else(|| principal.id.clone());
        if !principal.can_act_for(&owner) {
            return Err(GameError::Forbidden(
                "You can only create games for yourself".into(),
            ));
        }

        let mut game = Game::new(
            input.id,
            owner,
            input.user_game_id,
            input.game_type,
            input.location,
            self.clock.now(),
        )?;
        if let Some(note) = input.user_note {
            game = game.with_user_note(note);
        }
        if let Some(game_string) = input.game_string {
            game = game.with_game_string(game_string);
        }
        for player in input.players {
            game.add_player(player)?;
        }
        for debt in input.debts {
            game.add_debt(debt)?;
        }

        let revision = self.games.insert(&game).await?;
        tracing::info!(game_id = %game.id(), owner = %game.owner_id(), "Game created");

        self.effects.record(LifecycleEvent::GameCreated).await;
        Ok(game.with_revision(revision))
    }
}
