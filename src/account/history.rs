//! Represents account activity history
use crate::amount::Money;
use rust_decimal::Decimal;
use std::fmt;

/// Single event recorded in account history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// increase of balance by a deposit
    Deposited(Decimal),
    /// decrease of balance by a withdraw
    Withdrew(Decimal),
    /// balance was set directly
    BalanceSet(Decimal),
    /// interest gained by a savings account
    InterestApplied(Decimal),
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Deposited(v) => write!(f, "Deposited ${}", Money(*v)),
            Activity::Withdrew(v) => write!(f, "Withdrew ${}", Money(*v)),
            Activity::BalanceSet(v) => write!(f, "Balance set to ${}", Money(*v)),
            Activity::InterestApplied(v) => write!(f, "Interest applied ${}", Money(*v)),
        }
    }
}

/// Which balance changes end up in history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Deposits and checking withdrawals are logged, a direct balance set only when a
    /// negative value was clamped (with the value as requested). Savings withdrawals,
    /// savings balance sets and interest leave no entry.
    #[default]
    Faithful,
    /// Every successful balance change is logged with the resulting value.
    Uniform,
}

/// Append-only list of [`Activity`]
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<Activity>,
}

impl ActivityLog {
    pub fn record(&mut self, activity: Activity) {
        self.entries.push(activity);
    }

    pub fn entries(&self) -> &[Activity] {
        &self.entries
    }
}
