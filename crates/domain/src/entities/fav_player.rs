//! A user's saved contact for a regular player.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::DomainError;
use crate::value_objects::{Email, PlayerName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavPlayer {
    name: PlayerName,
    phone: String,
    email: Email,
    group: String,
    profit_loss: Decimal,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavPlayerUpdate {
    pub phone: Option<String>,
    pub email: Option<Email>,
    pub group: Option<String>,
    pub profit_loss: Option<Decimal>,
}

fn required(value: String, label: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", label)));
    }
    Ok(trimmed.to_string())
}

impl FavPlayer {
    pub fn new(
        name: PlayerName,
        phone: impl Into<String>,
        email: Email,
        group: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name,
            phone: required(phone.into(), "Phone")?,
            email,
            group: required(group.into(), "Group")?,
            profit_loss: Decimal::ZERO,
            created: now,
            updated: now,
        })
    }

    /// Restore the running tally and timestamps (used when loading from storage).
    pub fn with_history(
        mut self,
        profit_loss: Decimal,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        self.profit_loss = profit_loss;
        self.created = created;
        self.updated = updated;
        self
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn profit_loss(&self) -> Decimal {
        self.profit_loss
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    pub(crate) fn apply(
        &mut self,
        update: FavPlayerUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let phone = update.phone.map(|p| required(p, "Phone")).transpose()?;
        let group = update.group.map(|g| required(g, "Group")).transpose()?;

        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(group) = group {
            self.group = group;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(profit_loss) = update.profit_loss {
            self.profit_loss = profit_loss;
        }
        self.updated = now;
        Ok(())
    }
}
