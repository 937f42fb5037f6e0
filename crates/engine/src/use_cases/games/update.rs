//! Generic game update and explicit resolution.
//!
//! Both may flip the `resolved` flag; the resulting transition is what drives the
//! problems-solved counter.

use std::sync::Arc;

use pokerledger_domain::{DomainError, Game, GameChanges, GameId, ResolutionChange};

use super::{load_accessible, save, GameError};
use crate::infrastructure::ports::GameRepo;
use crate::use_cases::access::Principal;
use crate::use_cases::lifecycle::LifecycleEffects;

pub struct UpdateGame {
    games: Arc<dyn GameRepo>,
    effects: Arc<LifecycleEffects>,
}

impl UpdateGame {
    pub fn new(games: Arc<dyn GameRepo>, effects: Arc<LifecycleEffects>) -> Self {
        Self { games, effects }
    }

    /// # Errors
    ///
    /// - `GameError::Domain` if there is nothing to change, or a replacement player/debt list
    ///   holds duplicates
    /// - `GameError::Repo` with a conflict if the game changed since it was loaded
    pub async fn execute(
        &self,
        principal: &Principal,
        id: &GameId,
        changes: GameChanges,
    ) -> Result<Game, GameError> {
        if changes.is_empty() {
            return Err(DomainError::validation("No valid fields to update").into());
        }

        let mut game = load_accessible(&self.games, principal, id).await?;
        let change = game.apply_changes(changes)?;
        let game = save(&self.games, game).await?;

        if change != ResolutionChange::Unchanged {
            tracing::info!(game_id = %game.id(), change = ?change, "Game resolution changed");
        }
        self.effects.record(change.into()).await;
        Ok(game)
    }
}

pub struct ResolveGame {
    games: Arc<dyn GameRepo>,
    effects: Arc<LifecycleEffects>,
}

impl ResolveGame {
    pub fn new(games: Arc<dyn GameRepo>, effects: Arc<LifecycleEffects>) -> Self {
        Self { games, effects }
    }

    /// Mark the game resolved with a settlement narrative.
    ///
    /// Resolving an already-resolved game only replaces the narrative; it is not counted
    /// again.
    pub async fn execute(
        &self,
        principal: &Principal,
        id: &GameId,
        resolved_string: String,
    ) -> Result<Game, GameError> {
        let mut game = load_accessible(&self.games, principal, id).await?;
        let change = game.mark_resolved(resolved_string)?;
        let game = save(&self.games, game).await?;

        tracing::info!(game_id = %game.id(), change = ?change, "Game resolved");
        self.effects.record(change.into()).await;
        Ok(game)
    }
}
