//! User use cases: accounts, profile changes, deletion and favourite players.

mod account;
mod favorites;
mod profile;
mod removal;

use std::sync::Arc;

use pokerledger_domain::{DomainError, User, UserId};

use crate::infrastructure::ports::{PasswordError, RepoError, UserRepo};
use crate::use_cases::access::Principal;

pub use account::{CreateUser, Login, NewUser};
pub use favorites::{FavPlayerOps, NewFavPlayer};
pub use profile::{AdminUserUpdate, UserProfile};
pub use removal::DeleteUser;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{0}")]
    Forbidden(String),
    #[error("Invalid credentials!")]
    InvalidCredentials,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

impl UserError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Container for user use cases.
pub struct UserUseCases {
    pub create: CreateUser,
    pub login: Login,
    pub profile: UserProfile,
    pub delete: DeleteUser,
    pub favorites: FavPlayerOps,
}

impl UserUseCases {
    pub fn new(
        create: CreateUser,
        login: Login,
        profile: UserProfile,
        delete: DeleteUser,
        favorites: FavPlayerOps,
    ) -> Self {
        Self {
            create,
            login,
            profile,
            delete,
            favorites,
        }
    }
}

pub(crate) fn require_admin(principal: &Principal) -> Result<(), UserError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(UserError::Forbidden("Admin access required".into()))
    }
}

/// Load a user the caller may act for.
pub(crate) async fn load_for(
    users: &Arc<dyn UserRepo>,
    principal: &Principal,
    id: &UserId,
) -> Result<User, UserError> {
    if !principal.can_act_for(id) {
        return Err(UserError::Forbidden(
            "Access denied. You can only access your own resources.".into(),
        ));
    }
    users
        .get(id)
        .await?
        .ok_or_else(|| UserError::not_found("User", id))
}

pub(crate) fn check_password_length(password: &str, min_length: usize) -> Result<(), UserError> {
    if password.chars().count() < min_length {
        return Err(DomainError::validation(format!(
            "Password must be at least {} characters",
            min_length
        ))
        .into());
    }
    Ok(())
}
