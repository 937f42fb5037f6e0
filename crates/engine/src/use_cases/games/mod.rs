//! Game use cases: creation, queries, ledger edits, updates, resolution and deletion.
//!
//! Every mutation loads the game, checks the caller may touch it, applies the change to the
//! aggregate and saves it conditionally on the loaded revision. Statistics effects run only
//! after the save succeeded.

mod create;
mod delete;
mod ledger;
mod query;
mod update;

use std::sync::Arc;

use pokerledger_domain::{DomainError, Game, GameId};

use crate::infrastructure::ports::{GameRepo, RepoError};
use crate::use_cases::access::Principal;

pub use create::{CreateGame, NewGame};
pub use delete::DeleteGame;
pub use ledger::LedgerOps;
pub use query::GameQueries;
pub use update::{ResolveGame, UpdateGame};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl GameError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Container for game use cases.
pub struct GameUseCases {
    pub create: CreateGame,
    pub query: GameQueries,
    pub ledger: LedgerOps,
    pub update: UpdateGame,
    pub resolve: ResolveGame,
    pub delete: DeleteGame,
}

impl GameUseCases {
    pub fn new(
        create: CreateGame,
        query: GameQueries,
        ledger: LedgerOps,
        update: UpdateGame,
        resolve: ResolveGame,
        delete: DeleteGame,
    ) -> Self {
        Self {
            create,
            query,
            ledger,
            update,
            resolve,
            delete,
        }
    }
}

/// Load a game the caller owns (or any game, for admins).
pub(crate) async fn load_accessible(
    games: &Arc<dyn GameRepo>,
    principal: &Principal,
    id: &GameId,
) -> Result<Game, GameError> {
    let game = games
        .get(id)
        .await?
        .ok_or_else(|| GameError::not_found("Game", id))?;
    if !principal.can_access_game(&game) {
        return Err(GameError::Forbidden(
            "Access denied. You can only access games you created.".into(),
        ));
    }
    Ok(game)
}

/// Persist a mutated game and return it stamped with its new revision.
pub(crate) async fn save(games: &Arc<dyn GameRepo>, game: Game) -> Result<Game, GameError> {
    let revision = games.save(&game).await?;
    Ok(game.with_revision(revision))
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::infrastructure::ports::MockGameRepo;

    #[tokio::test]
    async fn missing_game_is_not_found() {
        let mut repo = MockGameRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        let games: Arc<dyn GameRepo> = Arc::new(repo);

        let err = load_accessible(&games, &principal("u1"), &game_id())
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::NotFound { entity_type: "Game", .. }));
    }

    #[tokio::test]
    async fn foreign_game_is_forbidden() {
        let mut repo = MockGameRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored_game())));
        let games: Arc<dyn GameRepo> = Arc::new(repo);

        let err = load_accessible(&games, &principal("u2"), &game_id())
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::Forbidden(_)));

        assert!(load_accessible(&games, &admin(), &game_id()).await.is_ok());
    }
}
