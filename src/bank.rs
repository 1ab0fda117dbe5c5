//! Collection of accounts with a selected one, the way a front end drives them
use crate::{
    account::{Account, BankAccount, HistoryMode, SavingsPolicy},
    amount::Money,
    csv::{ActivityRecord, RawCommand, RawOp},
    errors::{AccountErr, BalanceErr, BankErr},
};
use rust_decimal::Decimal;
use std::{collections::BTreeMap, fmt};
use tracing::{debug, info, warn};

/// Account identifier, unique within one [`Bank`] and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(u32);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rules applied to accounts opened by a [`Bank`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BankConfig {
    /// policy copied into every new savings account
    pub savings: SavingsPolicy,
    /// history mode of every new account
    pub history: HistoryMode,
}

#[derive(Debug)]
struct Entry {
    account: BankAccount,
    // what the user was shown, independent from account history
    activity: Vec<String>,
}

/// Accounts in creation order and the currently selected one
#[derive(Debug, Default)]
pub struct Bank {
    config: BankConfig,
    next_id: u32,
    accounts: BTreeMap<AccountId, Entry>,
    selected: Option<AccountId>,
}

impl Bank {
    /// Empty bank opening accounts according to `config`
    pub fn new(config: BankConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Open checking account with zero balance
    pub fn create_account(&mut self, name: &str) -> Result<AccountId, BankErr> {
        check_name(name)?;
        let account = BankAccount::checking(name, Decimal::ZERO);
        Ok(self.insert(account, format!("Account '{name}' created.")))
    }

    /// Open savings account, balance starts at the configured minimum
    pub fn create_saving_account(&mut self, name: &str) -> Result<AccountId, BankErr> {
        check_name(name)?;
        let account = BankAccount::savings_with(name, self.config.savings);
        Ok(self.insert(account, format!("SavingAccount '{name}' created.")))
    }

    fn insert(&mut self, account: BankAccount, created: String) -> AccountId {
        let id = AccountId(self.next_id);
        self.next_id += 1;

        info!(%id, name = account.name(), kind = account.kind_label(), "account created");
        let entry = Entry {
            account: account.with_history_mode(self.config.history),
            activity: vec![created],
        };
        self.accounts.insert(id, entry);
        id
    }

    /// Make `id` the target of later operations
    pub fn select(&mut self, id: AccountId) -> Result<(), BankErr> {
        if !self.accounts.contains_key(&id) {
            return Err(BankErr::NoSuchAccount(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Select the first account, in creation order, called `name`
    pub fn select_by_name(&mut self, name: &str) -> Result<AccountId, BankErr> {
        for (id, entry) in &self.accounts {
            if entry.account.name() == name {
                self.selected = Some(*id);
                return Ok(*id);
            }
        }
        Err(BankErr::UnknownName(name.to_owned()))
    }

    /// Currently selected account, if any
    pub fn selected(&self) -> Option<AccountId> {
        self.selected
    }

    /// Currently selected account or [`BankErr::NoSelection`]
    pub fn selection(&self) -> Result<AccountId, BankErr> {
        self.selected.ok_or(BankErr::NoSelection)
    }

    /// Deposit into `id`, returns new balance
    pub fn deposit(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, BankErr> {
        check_amount(amount)?;
        let entry = self.entry_mut(id)?;
        entry.account.try_deposit(amount)?;

        let balance = entry.account.balance();
        debug!(%id, %amount, %balance, "deposit");
        entry.activity.push(moved("Deposited", amount, balance));
        Ok(balance)
    }

    /// Withdraw from `id`, returns new balance
    pub fn withdraw(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, BankErr> {
        check_amount(amount)?;
        let entry = self.entry_mut(id)?;
        match entry.account.try_withdraw(amount) {
            Ok(()) => (),
            Err(AccountErr::AccMoney(BalanceErr::NotEnoughAvailableFunds)) => {
                return Err(BankErr::InsufficientFunds);
            }
            Err(e) => return Err(e.into()),
        }

        let balance = entry.account.balance();
        debug!(%id, %amount, %balance, "withdraw");
        entry.activity.push(moved("Withdrew", amount, balance));
        Ok(balance)
    }

    /// Set balance of `id` after checking `value` against the floor of its kind
    pub fn set_balance(&mut self, id: AccountId, value: Decimal) -> Result<(), BankErr> {
        check_amount(value)?;
        let entry = self.entry_mut(id)?;
        let floor = entry.account.floor();
        if value < floor {
            return Err(BankErr::BelowFloor { floor });
        }

        let old_balance = entry.account.balance();
        entry.account.set_balance(value);
        debug!(%id, %old_balance, %value, "balance set");
        entry.activity.push(format!(
            "Balance changed from ${} to ${}",
            Money(old_balance),
            Money(value)
        ));
        Ok(())
    }

    /// Apply interest now, returns new balance. Checking accounts are left untouched.
    pub fn apply_interest(&mut self, id: AccountId) -> Result<Decimal, BankErr> {
        let entry = self.entry_mut(id)?;
        let old_balance = entry.account.balance();
        let applied = entry.account.apply_interest();

        let balance = entry.account.balance();
        if applied {
            info!(%id, %old_balance, %balance, "interest applied");
            let line = format!("Interest applied. Balance: ${}", Money(balance));
            entry.activity.push(line);
        } else if entry.account.deposit_count().is_some() {
            warn!(%id, %balance, "interest skipped, balance would overflow");
        }
        Ok(balance)
    }

    /// Rename `id`
    pub fn rename(&mut self, id: AccountId, name: &str) -> Result<(), BankErr> {
        check_name(name)?;
        let entry = self.entry_mut(id)?;
        let old = entry.account.name().to_owned();
        entry.account.set_name(name);
        entry.activity.push(format!("Renamed from '{old}' to '{name}'."));
        Ok(())
    }

    /// Remove `id`. Selection pointing at it is cleared.
    pub fn delete(&mut self, id: AccountId) -> Result<BankAccount, BankErr> {
        let entry = self.accounts.remove(&id);
        let entry = entry.ok_or(BankErr::NoSuchAccount(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        info!(%id, name = entry.account.name(), "account deleted");
        Ok(entry.account)
    }

    /// Look up account
    pub fn get(&self, id: AccountId) -> Option<&BankAccount> {
        self.accounts.get(&id).map(|e| &e.account)
    }

    /// Accounts in creation order
    pub fn accounts(&self) -> impl Iterator<Item = &BankAccount> {
        self.accounts.values().map(|e| &e.account)
    }

    /// Activity feed of `id`, oldest first
    pub fn activity(&self, id: AccountId) -> Option<&[String]> {
        self.accounts.get(&id).map(|e| e.activity.as_slice())
    }

    /// Every feed line of every account, accounts in creation order
    pub fn activity_records(&self) -> Vec<ActivityRecord> {
        let mut records = Vec::new();
        for e in self.accounts.values() {
            for entry in &e.activity {
                records.push(ActivityRecord {
                    name: e.account.name().to_owned(),
                    entry: entry.clone(),
                });
            }
        }
        records
    }

    /// One line per account: `name (kind) : $balance`
    pub fn listing(&self) -> Vec<String> {
        self.accounts().map(listing_line).collect()
    }

    /// trying to apply next script command.
    ///
    /// Be aware that commands must be applied in order of the script
    pub fn try_apply_command(&mut self, command: RawCommand) -> Result<(), BankErr> {
        let name = command.name.as_deref().ok_or(BankErr::MissingName);
        let amount = command.amount.ok_or(BankErr::MissingAmount);
        match command.op {
            RawOp::Open => {
                self.create_account(name?)?;
            }
            RawOp::OpenSavings => {
                self.create_saving_account(name?)?;
            }
            RawOp::Select => {
                self.select_by_name(name?)?;
            }
            RawOp::Deposit => {
                let amount = amount?;
                self.deposit(self.selection()?, amount)?;
            }
            RawOp::Withdraw => {
                let amount = amount?;
                self.withdraw(self.selection()?, amount)?;
            }
            RawOp::SetBalance => {
                let amount = amount?;
                self.set_balance(self.selection()?, amount)?;
            }
            RawOp::Interest => {
                self.apply_interest(self.selection()?)?;
            }
            RawOp::Rename => {
                let name = name?;
                self.rename(self.selection()?, name)?;
            }
            RawOp::Delete => {
                self.delete(self.selection()?)?;
            }
        }
        Ok(())
    }

    fn entry_mut(&mut self, id: AccountId) -> Result<&mut Entry, BankErr> {
        let entry = self.accounts.get_mut(&id);
        entry.ok_or(BankErr::NoSuchAccount(id))
    }
}

impl Bank {
    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// No account is open
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn listing_line(account: &BankAccount) -> String {
    let balance = Money(account.balance());
    format!("{} ({}) : ${balance}", account.name(), account.kind_label())
}

fn moved(verb: &str, amount: Decimal, balance: Decimal) -> String {
    format!("{verb} ${}. Balance: ${}", Money(amount), Money(balance))
}

fn check_name(name: &str) -> Result<(), BankErr> {
    if name.trim().is_empty() {
        Err(BankErr::EmptyName)
    } else {
        Ok(())
    }
}

// amounts a teller may enter: 0.01 up to one million, cents at most
fn check_amount(amount: Decimal) -> Result<(), BankErr> {
    let min = Decimal::new(1, 2);
    let max = Decimal::new(1_000_000, 0);
    if amount < min || amount > max || amount.round_dp(2) != amount {
        return Err(BankErr::AmountOutOfRange { amount });
    }
    Ok(())
}

#[cfg(test)]
impl Bank {
    fn get_mut_for_test(&mut self, id: AccountId) -> &mut BankAccount {
        &mut self.accounts.get_mut(&id).unwrap().account
    }
}
