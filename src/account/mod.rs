//! Account traits and structs
use rust_decimal::Decimal;

pub(crate) mod balance;
pub(crate) mod bank_account;
pub(crate) mod history;

pub use bank_account::BankAccount;
pub use history::{Activity, HistoryMode};

/// Represent basic account information and balance
pub trait Account {
    /// display label of account, not unique
    fn name(&self) -> &str;
    /// current balance, never below the floor of account kind
    fn balance(&self) -> Decimal;
    /// append-only activity history, oldest first
    fn history(&self) -> &[Activity];
    /// checking or savings with its policy
    fn kind(&self) -> &AccountKind;

    /// name of account type as shown in listings
    fn kind_label(&self) -> &'static str {
        match self.kind() {
            AccountKind::Checking => "Account",
            AccountKind::Savings(_) => "SavingAccount",
        }
    }
}

impl<A: Account + ?Sized> Account for &A {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn balance(&self) -> Decimal {
        (**self).balance()
    }

    fn history(&self) -> &[Activity] {
        (**self).history()
    }

    fn kind(&self) -> &AccountKind {
        (**self).kind()
    }
}

/// Policy specific part of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// plain account, balance never negative
    Checking,
    /// account with a minimum balance and interest accrual
    Savings(SavingsState),
}

/// Rules shared by savings accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsPolicy {
    /// balance never drops below this value
    pub minimum: Decimal,
    /// interest rate applied as `balance * (1 + rate)`
    pub rate: Decimal,
    /// number of successful deposits that triggers interest
    pub deposits_per_interest: u32,
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        Self {
            minimum: Decimal::new(100, 0),
            rate: Decimal::new(2, 2),
            deposits_per_interest: 5,
        }
    }
}

/// Savings policy with deposits counted since interest was last applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsState {
    policy: SavingsPolicy,
    deposit_count: u32,
}

impl SavingsState {
    fn new(policy: SavingsPolicy) -> Self {
        Self {
            policy,
            deposit_count: 0,
        }
    }

    /// rules this account was opened with
    pub fn policy(&self) -> &SavingsPolicy {
        &self.policy
    }

    /// successful deposits since interest was last applied
    pub fn deposit_count(&self) -> u32 {
        self.deposit_count
    }

    // returns true when interest is due
    fn count_deposit(&mut self) -> bool {
        self.deposit_count += 1;
        self.deposit_count >= self.policy.deposits_per_interest
    }

    fn reset(&mut self) {
        self.deposit_count = 0;
    }
}
