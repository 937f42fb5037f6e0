//! Game repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use pokerledger_domain::{Game, GameId, UserId};
use serde_json::Value;

use super::records::{from_document, to_document, GameRecord};
use crate::infrastructure::ports::{
    Collection, Document, DocumentStore, Filter, GameRepo, Precondition, RepoError, ID_FIELD,
};

const OWNER_FIELD: &str = "userID";
const REVISION_FIELD: &str = "revision";

pub struct DocumentGameRepo {
    store: Arc<dyn DocumentStore>,
}

impl DocumentGameRepo {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn to_game(doc: Document) -> Result<Game, RepoError> {
    Game::try_from(from_document::<GameRecord>(doc)?)
}

#[async_trait]
impl GameRepo for DocumentGameRepo {
    async fn get(&self, id: &GameId) -> Result<Option<Game>, RepoError> {
        self.store
            .find_one(Collection::Games, id.as_str())
            .await?
            .map(to_game)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Game>, RepoError> {
        self.store
            .find_all(Collection::Games, &Filter::All)
            .await?
            .into_iter()
            .map(to_game)
            .collect()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Game>, RepoError> {
        self.store
            .find_all(
                Collection::Games,
                &Filter::field_equals(OWNER_FIELD, owner.as_str()),
            )
            .await?
            .into_iter()
            .map(to_game)
            .collect()
    }

    async fn insert(&self, game: &Game) -> Result<u64, RepoError> {
        let revision = game.revision() + 1;
        let doc = to_document(&GameRecord::from_game(game, revision))?;
        self.store.insert(Collection::Games, &doc).await?;
        Ok(revision)
    }

    async fn save(&self, game: &Game) -> Result<u64, RepoError> {
        let revision = game.revision() + 1;
        let mut fields = to_document(&GameRecord::from_game(game, revision))?;
        fields.remove(ID_FIELD);

        // Documents from before revisions existed have no field at all.
        let expected = match game.revision() {
            0 => Value::Null,
            loaded => Value::from(loaded),
        };
        let precondition = Precondition::new(REVISION_FIELD, expected);

        let matched = self
            .store
            .update_fields(
                Collection::Games,
                game.id().as_str(),
                &fields,
                Some(&precondition),
            )
            .await?;
        if matched > 0 {
            return Ok(revision);
        }

        match self.store.find_one(Collection::Games, game.id().as_str()).await? {
            None => Err(RepoError::not_found("Game", game.id())),
            Some(_) => Err(RepoError::conflict(format!(
                "game {} was modified concurrently",
                game.id()
            ))),
        }
    }

    async fn delete(&self, id: &GameId) -> Result<bool, RepoError> {
        Ok(self.store.delete(Collection::Games, id.as_str()).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pokerledger_domain::{GameLabel, GamePlayer, Money, PlayerName};
    use serde_json::json;

    use super::*;
    use crate::infrastructure::persistence::MemoryDocumentStore;

    fn game(id: &str, owner: &str) -> Game {
        Game::new(
            GameId::new(id).unwrap(),
            UserId::new(owner).unwrap(),
            1,
            GameLabel::new("Texas Holdem").unwrap(),
            GameLabel::new("Home").unwrap(),
            Utc::now(),
        )
        .unwrap()
    }

    fn repo() -> (Arc<MemoryDocumentStore>, DocumentGameRepo) {
        let store = Arc::new(MemoryDocumentStore::new());
        (store.clone(), DocumentGameRepo::new(store))
    }

    #[tokio::test]
    async fn insert_then_get() {
        let (_, repo) = repo();
        let revision = repo.insert(&game("g1", "u1")).await.unwrap();
        assert_eq!(revision, 1);

        let loaded = repo.get(&GameId::new("g1").unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.revision(), 1);
        assert_eq!(loaded.owner_id().as_str(), "u1");
    }

    #[tokio::test]
    async fn list_by_owner_filters() {
        let (_, repo) = repo();
        repo.insert(&game("g1", "u1")).await.unwrap();
        repo.insert(&game("g2", "u2")).await.unwrap();
        repo.insert(&game("g3", "u1")).await.unwrap();

        let owned = repo.list_by_owner(&UserId::new("u1").unwrap()).await.unwrap();
        let ids: Vec<&str> = owned.iter().map(|g| g.id().as_str()).collect();
        assert_eq!(ids, vec!["g1", "g3"]);
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn save_bumps_revision() {
        let (_, repo) = repo();
        repo.insert(&game("g1", "u1")).await.unwrap();

        let mut loaded = repo.get(&GameId::new("g1").unwrap()).await.unwrap().unwrap();
        loaded
            .add_player(GamePlayer::new(
                PlayerName::new("Alice").unwrap(),
                Money::from_units(100),
            ))
            .unwrap();
        assert_eq!(repo.save(&loaded).await.unwrap(), 2);

        let reloaded = repo.get(loaded.id()).await.unwrap().unwrap();
        assert_eq!(reloaded.players().len(), 1);
        assert_eq!(reloaded.revision(), 2);
    }

    #[tokio::test]
    async fn stale_save_is_a_conflict() {
        let (_, repo) = repo();
        repo.insert(&game("g1", "u1")).await.unwrap();
        let id = GameId::new("g1").unwrap();

        let first = repo.get(&id).await.unwrap().unwrap();
        let second = repo.get(&id).await.unwrap().unwrap();
        repo.save(&first).await.unwrap();

        let err = repo.save(&second).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn save_of_deleted_game_is_not_found() {
        let (_, repo) = repo();
        repo.insert(&game("g1", "u1")).await.unwrap();
        let loaded = repo.get(&GameId::new("g1").unwrap()).await.unwrap().unwrap();
        assert!(repo.delete(loaded.id()).await.unwrap());

        assert!(repo.save(&loaded).await.unwrap_err().is_not_found());
        assert!(!repo.delete(loaded.id()).await.unwrap());
    }

    #[tokio::test]
    async fn legacy_document_without_revision_can_be_saved() {
        let (store, repo) = repo();
        let legacy = json!({
            "_id": "old",
            "userID": "u1",
            "userGameID": 7,
            "type": "Omaha",
            "location": "Club"
        });
        let Value::Object(doc) = legacy else {
            unreachable!()
        };
        store.insert(Collection::Games, &doc).await.unwrap();

        let loaded = repo.get(&GameId::new("old").unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.revision(), 0);
        assert_eq!(repo.save(&loaded).await.unwrap(), 1);
    }
}
