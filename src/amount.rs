//! Protect before using zero or negative amount for deposits and withdraws.

use std::{borrow::Borrow, fmt, ops::Deref};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represent strictly positive financial amount of money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(Decimal);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("amount is not positive")]
/// represent error when operation want to move zero or negative amount of money
pub struct NonPositiveAmountErr;

impl TryFrom<Decimal> for Amount {
    type Error = NonPositiveAmountErr;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(NonPositiveAmountErr)
        }
    }
}

impl From<Amount> for Decimal {
    fn from(this: Amount) -> Self {
        this.0
    }
}

impl Borrow<Decimal> for Amount {
    fn borrow(&self) -> &Decimal {
        &self.0
    }
}

impl Deref for Amount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        self.borrow()
    }
}

/// Render money with exactly two decimal places, e.g. `-50` as `-50.00`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub Decimal);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}
