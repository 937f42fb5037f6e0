//! Logical and physical user deletion (admin only).

use std::sync::Arc;

use pokerledger_domain::{LifecycleEvent, UserId};

use super::{load_for, require_admin, UserError};
use crate::infrastructure::ports::UserRepo;
use crate::use_cases::access::Principal;
use crate::use_cases::lifecycle::LifecycleEffects;

pub struct DeleteUser {
    users: Arc<dyn UserRepo>,
    effects: Arc<LifecycleEffects>,
}

impl DeleteUser {
    pub fn new(users: Arc<dyn UserRepo>, effects: Arc<LifecycleEffects>) -> Self {
        Self { users, effects }
    }

    /// Flag the account as deleted. It keeps counting towards `totalUsers`.
    pub async fn soft_delete(&self, principal: &Principal, id: &UserId) -> Result<(), UserError> {
        require_admin(principal)?;
        let mut user = load_for(&self.users, principal, id).await?;
        user.soft_delete();
        self.users.save(&user).await?;
        tracing::info!(user_id = %id, "User logically deleted");
        Ok(())
    }

    pub async fn hard_delete(&self, principal: &Principal, id: &UserId) -> Result<(), UserError> {
        require_admin(principal)?;
        if !self.users.delete(id).await? {
            return Err(UserError::not_found("User", id));
        }
        tracing::info!(user_id = %id, "User physically deleted");

        self.effects.record(LifecycleEvent::UserDeleted).await;
        Ok(())
    }
}
