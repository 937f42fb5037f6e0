//! Read-only game queries.

use std::sync::Arc;

use pokerledger_domain::{Game, GameId, UserId};

use super::{load_accessible, GameError};
use crate::infrastructure::ports::GameRepo;
use crate::use_cases::access::Principal;

pub struct GameQueries {
    games: Arc<dyn GameRepo>,
}

impl GameQueries {
    pub fn new(games: Arc<dyn GameRepo>) -> Self {
        Self { games }
    }

    /// Every game for admins, the caller's own games otherwise.
    pub async fn list_visible(&self, principal: &Principal) -> Result<Vec<Game>, GameError> {
        if principal.is_admin() {
            Ok(self.games.list_all().await?)
        } else {
            Ok(self.games.list_by_owner(&principal.id).await?)
        }
    }

    pub async fn get(&self, principal: &Principal, id: &GameId) -> Result<Game, GameError> {
        load_accessible(&self.games, principal, id).await
    }

    pub async fn list_by_owner(
        &self,
        principal: &Principal,
        owner: &UserId,
    ) -> Result<Vec<Game>, GameError> {
        if !principal.can_act_for(owner) {
            return Err(GameError::Forbidden(
                "Access denied. You can only access your own resources.".into(),
            ));
        }
        Ok(self.games.list_by_owner(owner).await?)
    }
}
