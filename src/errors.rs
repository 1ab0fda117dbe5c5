//! Possible errors

use crate::{amount::NonPositiveAmountErr, bank::AccountId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Group errors for account balance
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BalanceErr {
    #[error("not enough funds available for this operation")]
    NotEnoughAvailableFunds,
    #[error("balance would exceed the largest representable amount")]
    Overflow,
}

/// Group all errors that can occurs within account module
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountErr {
    #[error("account money change error")]
    AccMoney(#[from] BalanceErr),
    #[error("amount was not positive")]
    Amount(#[from] NonPositiveAmountErr),
}

/// Errors reported by [`crate::bank::Bank`] to its caller
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BankErr {
    /// No account is selected for an operation that acts on the selection
    #[error("please select an account first")]
    NoSelection,
    /// Referenced account does not exist (for example it was deleted)
    #[error("account {0} does not exist")]
    NoSuchAccount(AccountId),
    /// No account carries the requested name
    #[error("no account named '{0}'")]
    UnknownName(String),
    /// Account names must contain at least one non-whitespace character
    #[error("account name is empty")]
    EmptyName,
    /// Withdrawal would break the balance floor of the account
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Amount is outside of what a teller may enter
    #[error("amount {amount} is not between 0.01 and 1000000 with at most 2 decimals")]
    AmountOutOfRange {
        #[allow(missing_docs)]
        amount: Decimal,
    },
    /// Requested balance is below the floor of this account kind
    #[error("balance cannot be lower than {floor}")]
    BelowFloor {
        #[allow(missing_docs)]
        floor: Decimal,
    },
    /// Script command lacks its `name` column
    #[error("command requires a name")]
    MissingName,
    /// Script command lacks its `amount` column
    #[error("command requires an amount")]
    MissingAmount,
    #[allow(missing_docs)]
    #[error("account operation failed")]
    Account(#[from] AccountErr),
}

/// Login was refused
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginErr {
    #[error("invalid credentials")]
    InvalidCredentials,
}
