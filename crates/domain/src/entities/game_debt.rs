//! A debt between two players of a game.

use crate::error::DomainError;
use crate::value_objects::{Money, PaymentType, PlayerName};

/// Money owed by `debtor` to `creditor`. The (debtor, creditor) pair is the debt's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDebt {
    debtor: PlayerName,
    creditor: PlayerName,
    amount: Money,
    payment_type: PaymentType,
}

/// Partial update for a debt. The key pair itself cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtUpdate {
    pub amount: Option<Money>,
    pub payment_type: Option<PaymentType>,
}

impl GameDebt {
    /// # Errors
    ///
    /// - amount is zero
    /// - debtor and creditor are the same player
    pub fn new(
        debtor: PlayerName,
        creditor: PlayerName,
        amount: Money,
        payment_type: PaymentType,
    ) -> Result<Self, DomainError> {
        if amount.is_zero() {
            return Err(DomainError::validation("Debt amount must be greater than zero"));
        }
        if debtor == creditor {
            return Err(DomainError::validation(
                "Debtor and creditor must be different players",
            ));
        }
        Ok(Self {
            debtor,
            creditor,
            amount,
            payment_type,
        })
    }

    #[inline]
    pub fn debtor(&self) -> &PlayerName {
        &self.debtor
    }

    #[inline]
    pub fn creditor(&self) -> &PlayerName {
        &self.creditor
    }

    #[inline]
    pub fn amount(&self) -> Money {
        self.amount
    }

    #[inline]
    pub fn payment_type(&self) -> &PaymentType {
        &self.payment_type
    }

    /// True if this debt is keyed by the given pair.
    pub fn is_between(&self, debtor: &PlayerName, creditor: &PlayerName) -> bool {
        &self.debtor == debtor && &self.creditor == creditor
    }

    pub(crate) fn apply(&mut self, update: DebtUpdate) -> Result<(), DomainError> {
        if let Some(amount) = update.amount {
            if amount.is_zero() {
                return Err(DomainError::validation("Debt amount must be greater than zero"));
            }
            self.amount = amount;
        }
        if let Some(payment_type) = update.payment_type {
            self.payment_type = payment_type;
        }
        Ok(())
    }
}
