//! A user's favourite players.

use std::sync::Arc;

use pokerledger_domain::{Email, FavPlayer, FavPlayerUpdate, PlayerName, User, UserId};

use super::{load_for, UserError};
use crate::infrastructure::ports::{ClockPort, UserRepo};
use crate::use_cases::access::Principal;

#[derive(Debug, Clone)]
pub struct NewFavPlayer {
    pub name: PlayerName,
    pub phone: String,
    pub email: Email,
    pub group: String,
}

pub struct FavPlayerOps {
    users: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
}

impl FavPlayerOps {
    pub fn new(users: Arc<dyn UserRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { users, clock }
    }

    pub async fn add(
        &self,
        principal: &Principal,
        user_id: &UserId,
        input: NewFavPlayer,
    ) -> Result<User, UserError> {
        let mut user = load_for(&self.users, principal, user_id).await?;
        let player = FavPlayer::new(
            input.name,
            input.phone,
            input.email,
            input.group,
            self.clock.now(),
        )?;
        user.add_fav_player(player)?;
        self.users.save(&user).await?;
        Ok(user)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        user_id: &UserId,
        name: &PlayerName,
        update: FavPlayerUpdate,
    ) -> Result<User, UserError> {
        let mut user = load_for(&self.users, principal, user_id).await?;
        if user
            .update_fav_player(name, update, self.clock.now())?
            .is_none()
        {
            return Err(UserError::not_found("Favorite player", name));
        }
        self.users.save(&user).await?;
        Ok(user)
    }

    pub async fn remove(
        &self,
        principal: &Principal,
        user_id: &UserId,
        name: &PlayerName,
    ) -> Result<User, UserError> {
        let mut user = load_for(&self.users, principal, user_id).await?;
        if user.remove_fav_player(name) == 0 {
            return Err(UserError::not_found("Favorite player", name));
        }
        self.users.save(&user).await?;
        Ok(user)
    }
}
