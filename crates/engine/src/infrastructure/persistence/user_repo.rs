//! User repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use pokerledger_domain::{Email, User, UserId};

use super::records::{from_document, to_document, UserRecord};
use crate::infrastructure::ports::{
    Collection, Document, DocumentStore, Filter, RepoError, UserRepo, ID_FIELD,
};

const EMAIL_FIELD: &str = "email";

pub struct DocumentUserRepo {
    store: Arc<dyn DocumentStore>,
}

impl DocumentUserRepo {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn to_user(doc: Document) -> Result<User, RepoError> {
    User::try_from(from_document::<UserRecord>(doc)?)
}

#[async_trait]
impl UserRepo for DocumentUserRepo {
    async fn get(&self, id: &UserId) -> Result<Option<User>, RepoError> {
        self.store
            .find_one(Collection::Users, id.as_str())
            .await?
            .map(to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepoError> {
        self.store
            .find_all(
                Collection::Users,
                &Filter::field_equals(EMAIL_FIELD, email.as_str()),
            )
            .await?
            .into_iter()
            .next()
            .map(to_user)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        self.store
            .find_all(Collection::Users, &Filter::All)
            .await?
            .into_iter()
            .map(to_user)
            .collect()
    }

    async fn insert(&self, user: &User) -> Result<(), RepoError> {
        let doc = to_document(&UserRecord::from(user))?;
        self.store.insert(Collection::Users, &doc).await
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        let mut fields = to_document(&UserRecord::from(user))?;
        fields.remove(ID_FIELD);
        let matched = self
            .store
            .update_fields(Collection::Users, user.id().as_str(), &fields, None)
            .await?;
        if matched == 0 {
            return Err(RepoError::not_found("User", user.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepoError> {
        Ok(self.store.delete(Collection::Users, id.as_str()).await? > 0)
    }
}
