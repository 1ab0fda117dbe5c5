use super::balance::Balance;
use super::history::{Activity, ActivityLog, HistoryMode};
use super::{Account, AccountKind, SavingsPolicy, SavingsState};
use crate::{
    amount::{Amount, Money},
    errors::AccountErr,
};
use rust_decimal::Decimal;
use std::fmt;

/// Checking or savings account with its balance and activity history
#[derive(Debug, Clone)]
pub struct BankAccount {
    name: String,
    balance: Balance,
    history: ActivityLog,
    kind: AccountKind,
    history_mode: HistoryMode,
}

impl BankAccount {
    /// Create checking account. Negative `initial` balance is clamped to zero.
    pub fn checking(name: impl Into<String>, initial: Decimal) -> Self {
        Self {
            name: name.into(),
            balance: Balance::new(initial, Decimal::ZERO),
            history: ActivityLog::default(),
            kind: AccountKind::Checking,
            history_mode: HistoryMode::default(),
        }
    }

    /// Create savings account with default [`SavingsPolicy`]
    pub fn savings(name: impl Into<String>) -> Self {
        Self::savings_with(name, SavingsPolicy::default())
    }

    /// Create savings account, balance starts at `policy.minimum`
    pub fn savings_with(name: impl Into<String>, policy: SavingsPolicy) -> Self {
        Self {
            name: name.into(),
            balance: Balance::new(policy.minimum, policy.minimum),
            history: ActivityLog::default(),
            kind: AccountKind::Savings(SavingsState::new(policy)),
            history_mode: HistoryMode::default(),
        }
    }

    /// Choose which balance changes are written to history
    pub fn with_history_mode(mut self, mode: HistoryMode) -> Self {
        self.history_mode = mode;
        self
    }

    /// Deposit a positive amount. Every `deposits_per_interest`-th successful deposit into
    /// a savings account applies interest afterwards.
    ///
    /// If this function return error account state was not changed.
    pub fn try_deposit(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        let amount = Amount::try_from(amount)?;
        self.balance.try_deposit(&amount)?;
        self.history.record(Activity::Deposited(amount.into()));

        let interest_due = match &mut self.kind {
            AccountKind::Checking => false,
            AccountKind::Savings(state) => state.count_deposit(),
        };
        if interest_due {
            self.apply_interest();
        }
        Ok(())
    }

    /// [`Self::try_deposit`] reporting only success
    pub fn deposit(&mut self, amount: Decimal) -> bool {
        self.try_deposit(amount).is_ok()
    }

    /// Withdraw a positive amount if the balance stays at or above its floor
    ///
    /// If this function return error account state was not changed.
    pub fn try_withdraw(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        let amount = Amount::try_from(amount)?;
        self.balance.try_withdraw(&amount)?;

        if self.is_checking() || self.history_mode == HistoryMode::Uniform {
            self.history.record(Activity::Withdrew(amount.into()));
        }
        Ok(())
    }

    /// [`Self::try_withdraw`] reporting only success
    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        self.try_withdraw(amount).is_ok()
    }

    /// Set balance directly, values below the floor are raised to it.
    pub fn set_balance(&mut self, value: Decimal) {
        let clamped = self.balance.set_clamped(value);

        let logged = match self.history_mode {
            HistoryMode::Uniform => Some(self.balance.amount()),
            // requested value is logged, not the stored one
            HistoryMode::Faithful if clamped && self.is_checking() => Some(value),
            HistoryMode::Faithful => None,
        };
        if let Some(value) = logged {
            self.history.record(Activity::BalanceSet(value));
        }
    }

    /// Multiply balance by `1 + rate` and restart deposit counting. No-op for checking
    /// accounts.
    ///
    /// Returns `false` for checking accounts and when the grown balance would overflow, in
    /// which case the balance stays as it was.
    pub fn apply_interest(&mut self) -> bool {
        let rate = match &mut self.kind {
            AccountKind::Checking => return false,
            AccountKind::Savings(state) => {
                state.reset();
                state.policy().rate
            }
        };

        match self.balance.try_grow(rate) {
            Ok(gained) => {
                if self.history_mode == HistoryMode::Uniform {
                    self.history.record(Activity::InterestApplied(gained));
                }
                true
            }
            Err(_) => false,
        }
    }

    /// Rename account, no validation
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Successful deposits since interest was last applied, `None` for checking
    pub fn deposit_count(&self) -> Option<u32> {
        match &self.kind {
            AccountKind::Checking => None,
            AccountKind::Savings(state) => Some(state.deposit_count()),
        }
    }

    /// Lowest balance this account may hold
    pub fn floor(&self) -> Decimal {
        self.balance.floor()
    }

    fn is_checking(&self) -> bool {
        matches!(self.kind, AccountKind::Checking)
    }
}

impl Account for BankAccount {
    fn name(&self) -> &str {
        &self.name
    }

    fn balance(&self) -> Decimal {
        self.balance.amount()
    }

    fn history(&self) -> &[Activity] {
        self.history.entries()
    }

    fn kind(&self) -> &AccountKind {
        &self.kind
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_checking() {
            write!(f, "SAVING ACCOUNT: ")?;
        }
        write!(
            f,
            "Account name: {}, Account balance: {}",
            self.name,
            Money(self.balance.amount())
        )
    }
}
