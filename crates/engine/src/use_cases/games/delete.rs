//! Hard-delete a game.

use std::sync::Arc;

use pokerledger_domain::GameId;

use super::{load_accessible, GameError};
use crate::infrastructure::ports::GameRepo;
use crate::use_cases::access::Principal;
use crate::use_cases::lifecycle::LifecycleEffects;

pub struct DeleteGame {
    games: Arc<dyn GameRepo>,
    effects: Arc<LifecycleEffects>,
}

impl DeleteGame {
    pub fn new(games: Arc<dyn GameRepo>, effects: Arc<LifecycleEffects>) -> Self {
        Self { games, effects }
    }

    /// Remove the game and take it back out of the counters (both of them, if it had been
    /// resolved).
    pub async fn execute(&self, principal: &Principal, id: &GameId) -> Result<(), GameError> {
        let game = load_accessible(&self.games, principal, id).await?;
        let event = game.deletion_event();

        if !self.games.delete(id).await? {
            return Err(GameError::not_found("Game", id));
        }
        tracing::info!(game_id = %id, "Game deleted");

        self.effects.record(event).await;
        Ok(())
    }
}
