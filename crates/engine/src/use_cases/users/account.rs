//! Sign-up and login.

use std::sync::Arc;

use pokerledger_domain::{DomainError, Email, LifecycleEvent, User, UserId, Username};

use super::{check_password_length, UserError};
use crate::infrastructure::ports::{ClockPort, PasswordHasherPort, UserRepo};
use crate::use_cases::access::Principal;
use crate::use_cases::lifecycle::LifecycleEffects;

/// Validated sign-up input. The password is still plain text here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub email: Email,
    pub password: String,
    pub username: Username,
}

pub struct CreateUser {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasherPort>,
    effects: Arc<LifecycleEffects>,
    clock: Arc<dyn ClockPort>,
    password_min_length: usize,
}

impl CreateUser {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: Arc<dyn PasswordHasherPort>,
        effects: Arc<LifecycleEffects>,
        clock: Arc<dyn ClockPort>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            effects,
            clock,
            password_min_length,
        }
    }

    /// # Errors
    ///
    /// - `UserError::Domain` for a short password or an email already registered
    /// - `UserError::Repo` with a conflict if the id is taken
    pub async fn execute(&self, input: NewUser) -> Result<User, UserError> {
        check_password_length(&input.password, self.password_min_length)?;

        // Not atomic with the insert below; two simultaneous sign-ups can both pass.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::constraint("Email is already registered").into());
        }

        let hash = self.hasher.hash(&input.password)?;
        let user = User::new(
            input.id,
            input.email,
            hash,
            input.username,
            self.clock.now(),
        );
        self.users.insert(&user).await?;
        tracing::info!(user_id = %user.id(), "User created");

        self.effects.record(LifecycleEvent::UserCreated).await;
        Ok(user)
    }
}

pub struct Login {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasherPort>,
}

impl Login {
    pub fn new(users: Arc<dyn UserRepo>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self { users, hasher }
    }

    /// Check credentials and return the principal to issue a token for.
    ///
    /// Unknown emails, deleted accounts and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn execute(&self, email: &str, password: &str) -> Result<Principal, UserError> {
        let Ok(email) = Email::new(email) else {
            return Err(UserError::InvalidCredentials);
        };
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(UserError::InvalidCredentials);
        };
        if user.is_deleted() || !self.hasher.verify(password, user.password_hash()) {
            tracing::debug!(user_id = %user.id(), "Login rejected");
            return Err(UserError::InvalidCredentials);
        }
        Ok(Principal::new(user.id().clone(), user.role()))
    }
}
