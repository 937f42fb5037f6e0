//! SQLite-backed document store.
//!
//! All collections share one table; bodies are JSON text manipulated with SQLite's JSON1
//! functions so that partial updates and counter increments happen inside a single
//! statement.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{
    document_id, Collection, Document, DocumentStore, Filter, Precondition, RepoError,
};

/// SQLite implementation of the persistence gateway.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field)
}

fn map_sqlx(operation: &'static str, e: sqlx::Error) -> RepoError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::conflict(format!("duplicate document in {}", operation))
        }
        _ => RepoError::database(operation, e),
    }
}

fn parse_body(body: &str) -> Result<Document, RepoError> {
    serde_json::from_str(body).map_err(RepoError::serialization)
}

fn to_json_text(value: &impl serde::Serialize) -> Result<String, RepoError> {
    serde_json::to_string(value).map_err(RepoError::serialization)
}

impl SqliteDocumentStore {
    /// Open (creating if missing) the database at `url` and ensure the schema exists.
    ///
    /// In-memory URLs get a single long-lived connection, since every SQLite connection
    /// would otherwise see its own empty database.
    pub async fn connect(url: &str) -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepoError::database("connect", e))?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("migrate", e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find_one(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, RepoError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("find_one", e))?;

        match row {
            Some(row) => {
                let body: String = row.get("body");
                Ok(Some(parse_body(&body)?))
            }
            None => Ok(None),
        }
    }

    async fn find_all(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, RepoError> {
        let rows = match filter {
            Filter::All => {
                sqlx::query("SELECT body FROM documents WHERE collection = ? ORDER BY rowid")
                    .bind(collection.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            Filter::FieldEquals { field, value } => {
                sqlx::query(
                    r#"
                    SELECT body FROM documents
                    WHERE collection = ? AND json_extract(body, ?) = json_extract(?, '$')
                    ORDER BY rowid
                    "#,
                )
                .bind(collection.as_str())
                .bind(json_path(field))
                .bind(to_json_text(value)?)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| map_sqlx("find_all", e))?;

        rows.iter()
            .map(|row| parse_body(&row.get::<String, _>("body")))
            .collect()
    }

    async fn insert(&self, collection: Collection, doc: &Document) -> Result<(), RepoError> {
        let id = document_id(doc)?;
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection.as_str())
            .bind(id)
            .bind(to_json_text(doc)?)
            .execute(&self.pool)
            .await
            .map_err(|e| match map_sqlx("insert", e) {
                RepoError::Conflict(_) => {
                    RepoError::conflict(format!("{} '{}' already exists", collection, id))
                }
                other => other,
            })?;
        Ok(())
    }

    async fn update_fields(
        &self,
        collection: Collection,
        id: &str,
        fields: &Document,
        precondition: Option<&Precondition>,
    ) -> Result<u64, RepoError> {
        let assignment = if fields.is_empty() {
            "body".to_string()
        } else {
            let pairs = vec!["?, json(?)"; fields.len()].join(", ");
            format!("json_set(body, {})", pairs)
        };
        let mut sql = format!(
            "UPDATE documents SET body = {} WHERE collection = ? AND id = ?",
            assignment
        );
        if precondition.is_some() {
            sql.push_str(" AND json_extract(body, ?) IS json_extract(?, '$')");
        }

        let mut query = sqlx::query(&sql);
        for (field, value) in fields {
            query = query.bind(json_path(field)).bind(to_json_text(value)?);
        }
        query = query.bind(collection.as_str()).bind(id);
        if let Some(pre) = precondition {
            query = query
                .bind(json_path(&pre.field))
                .bind(to_json_text(&pre.expected)?);
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("update_fields", e))?;
        Ok(result.rows_affected())
    }

    async fn increment_field(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: i64,
        floor: Option<i64>,
    ) -> Result<u64, RepoError> {
        let path = json_path(field);
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = json_set(body, ?, COALESCE(json_extract(body, ?), 0) + ?)
            WHERE collection = ? AND id = ?
              AND typeof(COALESCE(json_extract(body, ?), 0) + ?) = 'integer'
              AND (? IS NULL OR COALESCE(json_extract(body, ?), 0) + ? >= ?)
            "#,
        )
        .bind(path.as_str())
        .bind(path.as_str())
        .bind(delta)
        .bind(collection.as_str())
        .bind(id)
        // SQLite turns an overflowing integer sum into a REAL; such adds match nothing.
        .bind(path.as_str())
        .bind(delta)
        .bind(floor)
        .bind(path.as_str())
        .bind(delta)
        .bind(floor)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx("increment_field", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("delete", e))?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test documents are objects"),
        }
    }

    async fn store() -> SqliteDocumentStore {
        SqliteDocumentStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = store().await;
        store
            .insert(Collection::Games, &doc(json!({ "_id": "g1", "location": "home" })))
            .await
            .unwrap();

        let found = store.find_one(Collection::Games, "g1").await.unwrap().unwrap();
        assert_eq!(found["location"], "home");
        assert!(store.find_one(Collection::Users, "g1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_conflict() {
        let store = store().await;
        let d = doc(json!({ "_id": "g1" }));
        store.insert(Collection::Games, &d).await.unwrap();
        let err = store.insert(Collection::Games, &d).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order_and_filters() {
        let store = store().await;
        for (id, owner) in [("b", "u1"), ("a", "u2"), ("c", "u1")] {
            store
                .insert(Collection::Games, &doc(json!({ "_id": id, "userID": owner })))
                .await
                .unwrap();
        }

        let all = store.find_all(Collection::Games, &Filter::All).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|d| d["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let mine = store
            .find_all(Collection::Games, &Filter::field_equals("userID", "u1"))
            .await
            .unwrap();
        let ids: Vec<&str> = mine.iter().map(|d| d["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn update_fields_sets_only_given_fields() {
        let store = store().await;
        store
            .insert(
                Collection::Games,
                &doc(json!({ "_id": "g1", "location": "home", "gamePlayers": [{"playerName": "A"}] })),
            )
            .await
            .unwrap();

        let matched = store
            .update_fields(
                Collection::Games,
                "g1",
                &doc(json!({ "gamePlayers": [], "resolved": true })),
                None,
            )
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let found = store.find_one(Collection::Games, "g1").await.unwrap().unwrap();
        assert_eq!(found["location"], "home");
        assert_eq!(found["gamePlayers"], json!([]));
        assert_eq!(found["resolved"], json!(true));
    }

    #[tokio::test]
    async fn update_missing_document_matches_nothing() {
        let store = store().await;
        let matched = store
            .update_fields(Collection::Games, "nope", &doc(json!({ "a": 1 })), None)
            .await
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn precondition_guards_update() {
        let store = store().await;
        store
            .insert(Collection::Games, &doc(json!({ "_id": "g1", "revision": 3 })))
            .await
            .unwrap();

        let stale = Precondition::new("revision", 2);
        let matched = store
            .update_fields(Collection::Games, "g1", &doc(json!({ "revision": 4 })), Some(&stale))
            .await
            .unwrap();
        assert_eq!(matched, 0);

        let fresh = Precondition::new("revision", 3);
        let matched = store
            .update_fields(Collection::Games, "g1", &doc(json!({ "revision": 4 })), Some(&fresh))
            .await
            .unwrap();
        assert_eq!(matched, 1);
    }

    #[tokio::test]
    async fn null_precondition_matches_absent_field() {
        let store = store().await;
        store
            .insert(Collection::Games, &doc(json!({ "_id": "legacy" })))
            .await
            .unwrap();

        let matched = store
            .update_fields(
                Collection::Games,
                "legacy",
                &doc(json!({ "revision": 1 })),
                Some(&Precondition::new("revision", Value::Null)),
            )
            .await
            .unwrap();
        assert_eq!(matched, 1);
    }

    #[tokio::test]
    async fn increment_respects_floor() {
        let store = store().await;
        store
            .insert(Collection::Global, &doc(json!({ "_id": "Global", "totalUsers": 1 })))
            .await
            .unwrap();

        assert_eq!(
            store
                .increment_field(Collection::Global, "Global", "totalUsers", -1, Some(0))
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .increment_field(Collection::Global, "Global", "totalUsers", -1, Some(0))
                .await
                .unwrap(),
            0
        );

        let found = store.find_one(Collection::Global, "Global").await.unwrap().unwrap();
        assert_eq!(found["totalUsers"], 0);
    }

    #[tokio::test]
    async fn overflowing_increment_writes_nothing() {
        let store = store().await;
        store
            .insert(Collection::Global, &doc(json!({ "_id": "Global", "totalUsers": 1 })))
            .await
            .unwrap();

        let modified = store
            .increment_field(Collection::Global, "Global", "totalUsers", i64::MAX, Some(0))
            .await
            .unwrap();
        assert_eq!(modified, 0);

        let found = store.find_one(Collection::Global, "Global").await.unwrap().unwrap();
        assert_eq!(found["totalUsers"], 1);
        assert!(found["totalUsers"].is_i64());
    }

    #[tokio::test]
    async fn increment_treats_absent_field_as_zero() {
        let store = store().await;
        store
            .insert(Collection::Global, &doc(json!({ "_id": "Global" })))
            .await
            .unwrap();
        store
            .increment_field(Collection::Global, "Global", "totalProblemsSolved", 2, None)
            .await
            .unwrap();

        let found = store.find_one(Collection::Global, "Global").await.unwrap().unwrap();
        assert_eq!(found["totalProblemsSolved"], 2);
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("docs.db").display());
        let store = Arc::new(SqliteDocumentStore::connect(&url).await.unwrap());
        store
            .insert(Collection::Global, &doc(json!({ "_id": "Global", "totalGamesRecorded": 0 })))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..40 {
            let store = store.clone();
            let delta = if i % 4 == 0 { -1 } else { 1 };
            handles.push(tokio::spawn(async move {
                store
                    .increment_field(Collection::Global, "Global", "totalGamesRecorded", delta, None)
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 1);
        }

        let found = store.find_one(Collection::Global, "Global").await.unwrap().unwrap();
        // 30 increments, 10 decrements
        assert_eq!(found["totalGamesRecorded"], 20);
    }

    #[tokio::test]
    async fn delete_reports_count() {
        let store = store().await;
        store
            .insert(Collection::Users, &doc(json!({ "_id": "u1" })))
            .await
            .unwrap();
        assert_eq!(store.delete(Collection::Users, "u1").await.unwrap(), 1);
        assert_eq!(store.delete(Collection::Users, "u1").await.unwrap(), 0);
    }
}
