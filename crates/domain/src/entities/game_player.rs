//! A player seated in one game.

use rust_decimal::Decimal;

use crate::value_objects::{Money, PlayerName};

/// A player's buy-in and cash-out within one game.
///
/// `profit_loss` is derived on every read (`cash_out - buy_in`), so it can never drift from
/// the amounts it is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePlayer {
    name: PlayerName,
    buy_in: Money,
    cash_out: Money,
}

/// Partial update for a player. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub name: Option<PlayerName>,
    pub buy_in: Option<Money>,
    pub cash_out: Option<Money>,
}

impl PlayerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.buy_in.is_none() && self.cash_out.is_none()
    }
}

impl GamePlayer {
    /// A player who has bought in and not cashed out yet.
    pub fn new(name: PlayerName, buy_in: Money) -> Self {
        Self {
            name,
            buy_in,
            cash_out: Money::ZERO,
        }
    }

    pub fn with_cash_out(mut self, cash_out: Money) -> Self {
        self.cash_out = cash_out;
        self
    }

    #[inline]
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    #[inline]
    pub fn buy_in(&self) -> Money {
        self.buy_in
    }

    #[inline]
    pub fn cash_out(&self) -> Money {
        self.cash_out
    }

    pub fn profit_loss(&self) -> Decimal {
        self.cash_out.amount() - self.buy_in.amount()
    }

    pub(crate) fn apply(&mut self, update: PlayerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(buy_in) = update.buy_in {
            self.buy_in = buy_in;
        }
        if let Some(cash_out) = update.cash_out {
            self.cash_out = cash_out;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_not_cashed_out() {
        let p = GamePlayer::new(PlayerName::new("Alice").unwrap(), Money::from_units(100));
        assert_eq!(p.cash_out(), Money::ZERO);
        assert_eq!(p.profit_loss(), Decimal::from(-100));
    }

    #[test]
    fn profit_loss_follows_updates() {
        let mut p = GamePlayer::new(PlayerName::new("Bob").unwrap(), Money::from_units(50));
        p.apply(PlayerUpdate {
            cash_out: Some(Money::from_units(80)),
            ..Default::default()
        });
        assert_eq!(p.profit_loss(), Decimal::from(30));

        p.apply(PlayerUpdate {
            buy_in: Some(Money::from_units(100)),
            ..Default::default()
        });
        assert_eq!(p.profit_loss(), Decimal::from(-20));
    }
}
