//! Reading and editing user profiles.

use std::sync::Arc;

use pokerledger_domain::{DomainError, Email, User, UserId, UserRole, UserStatistics, Username};

use super::{check_password_length, load_for, require_admin, UserError};
use crate::infrastructure::ports::{PasswordHasherPort, UserRepo};
use crate::use_cases::access::Principal;

/// Fields an admin may overwrite. Statistics are optional; the rest are required.
#[derive(Debug, Clone)]
pub struct AdminUserUpdate {
    pub username: Username,
    pub email: Email,
    pub role: UserRole,
    pub statistics: Option<UserStatistics>,
}

pub struct UserProfile {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasherPort>,
    password_min_length: usize,
}

impl UserProfile {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: Arc<dyn PasswordHasherPort>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            password_min_length,
        }
    }

    pub async fn list(&self, principal: &Principal) -> Result<Vec<User>, UserError> {
        require_admin(principal)?;
        Ok(self.users.list_all().await?)
    }

    pub async fn get(&self, principal: &Principal, id: &UserId) -> Result<User, UserError> {
        load_for(&self.users, principal, id).await
    }

    /// # Errors
    ///
    /// - `UserError::Domain` with a precondition failure if `current` is not the stored email
    /// - `UserError::Domain` with a constraint violation if another account uses `new_email`
    pub async fn change_email(
        &self,
        principal: &Principal,
        id: &UserId,
        current: &Email,
        new_email: Email,
    ) -> Result<User, UserError> {
        let mut user = load_for(&self.users, principal, id).await?;
        user.change_email(current, new_email.clone())?;
        self.ensure_email_free(&new_email, id).await?;
        self.users.save(&user).await?;
        Ok(user)
    }

    /// # Errors
    ///
    /// `UserError::Domain` with a precondition failure if `old_password` does not match.
    pub async fn change_password(
        &self,
        principal: &Principal,
        id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), UserError> {
        check_password_length(new_password, self.password_min_length)?;
        let mut user = load_for(&self.users, principal, id).await?;
        if !self.hasher.verify(old_password, user.password_hash()) {
            return Err(DomainError::precondition("Old password must match.").into());
        }
        user.set_password_hash(self.hasher.hash(new_password)?);
        self.users.save(&user).await?;
        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    pub async fn change_username(
        &self,
        principal: &Principal,
        id: &UserId,
        username: Username,
    ) -> Result<User, UserError> {
        let mut user = load_for(&self.users, principal, id).await?;
        user.set_username(username);
        self.users.save(&user).await?;
        Ok(user)
    }

    pub async fn admin_update(
        &self,
        principal: &Principal,
        id: &UserId,
        update: AdminUserUpdate,
    ) -> Result<User, UserError> {
        require_admin(principal)?;
        let mut user = load_for(&self.users, principal, id).await?;

        if &update.email != user.email() {
            self.ensure_email_free(&update.email, id).await?;
        }
        user.set_username(update.username);
        user.set_email(update.email);
        user.set_role(update.role);
        if let Some(statistics) = update.statistics {
            user.set_statistics(statistics);
        }

        self.users.save(&user).await?;
        tracing::info!(user_id = %id, role = %user.role(), "User updated by admin");
        Ok(user)
    }

    async fn ensure_email_free(&self, email: &Email, owner: &UserId) -> Result<(), UserError> {
        match self.users.find_by_email(email).await? {
            Some(other) if other.id() != owner => {
                Err(DomainError::constraint("Email is already registered").into())
            }
            _ => Ok(()),
        }
    }
}
