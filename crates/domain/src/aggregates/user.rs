//! User aggregate - account credentials, profile and favourite players

use chrono::{DateTime, Utc};

use crate::entities::{FavPlayer, FavPlayerUpdate, UserStatistics};
use crate::error::DomainError;
use crate::ids::UserId;
use crate::value_objects::{Email, PlayerName, UserRole, Username};

/// A registered user.
///
/// # Invariants
///
/// - favourite player names are unique per user
/// - `password_hash` is an opaque hash produced by the engine's hasher, never plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: String,
    username: Username,
    role: UserRole,
    created_at: DateTime<Utc>,
    is_deleted: bool,
    statistics: UserStatistics,
    fav_players: Vec<FavPlayer>,
}

impl User {
    pub fn new(
        id: UserId,
        email: Email,
        password_hash: impl Into<String>,
        username: Username,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash: password_hash.into(),
            username,
            role: UserRole::default(),
            created_at,
            is_deleted: false,
            statistics: UserStatistics::default(),
            fav_players: Vec::new(),
        }
    }

    // Builders for loading from storage

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    pub fn with_statistics(mut self, statistics: UserStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_fav_players(mut self, fav_players: Vec<FavPlayer>) -> Self {
        self.fav_players = fav_players;
        self
    }

    // Accessors

    #[inline]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[inline]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[inline]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[inline]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[inline]
    pub fn role(&self) -> UserRole {
        self.role
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    #[inline]
    pub fn statistics(&self) -> &UserStatistics {
        &self.statistics
    }

    #[inline]
    pub fn fav_players(&self) -> &[FavPlayer] {
        &self.fav_players
    }

    pub fn fav_player(&self, name: &PlayerName) -> Option<&FavPlayer> {
        self.fav_players.iter().find(|p| p.name() == name)
    }

    // Profile

    /// Replace the email address, provided the caller knows the current one.
    ///
    /// # Errors
    ///
    /// `DomainError::PreconditionFailed` if `current` is not this user's email.
    pub fn change_email(&mut self, current: &Email, new_email: Email) -> Result<(), DomainError> {
        if &self.email != current {
            return Err(DomainError::precondition(
                "Current email does not match the provided old email",
            ));
        }
        self.email = new_email;
        Ok(())
    }

    /// Admin-side email replacement, no current-value check.
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }

    pub fn set_username(&mut self, username: Username) {
        self.username = username;
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    pub fn set_statistics(&mut self, statistics: UserStatistics) {
        self.statistics = statistics;
    }

    /// Logical delete. The account stays in storage and keeps counting as a user.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    // Favourite players

    /// # Errors
    ///
    /// `DomainError::Constraint` if a favourite with the same name exists.
    pub fn add_fav_player(&mut self, player: FavPlayer) -> Result<(), DomainError> {
        if self.fav_player(player.name()).is_some() {
            return Err(DomainError::constraint("Player already exists in favorites"));
        }
        self.fav_players.push(player);
        Ok(())
    }

    /// Returns how many favourites were removed.
    pub fn remove_fav_player(&mut self, name: &PlayerName) -> usize {
        let before = self.fav_players.len();
        self.fav_players.retain(|p| p.name() != name);
        before - self.fav_players.len()
    }

    /// Returns `Ok(None)` when no favourite has that name.
    pub fn update_fav_player(
        &mut self,
        name: &PlayerName,
        update: FavPlayerUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<&FavPlayer>, DomainError> {
        let Some(player) = self.fav_players.iter_mut().find(|p| p.name() == name) else {
            return Ok(None);
        };
        player.apply(update, now)?;
        Ok(Some(player))
    }
}
