use {
    anyhow::ensure,
    bank_accounts::{
        account::{HistoryMode, SavingsPolicy},
        auth::StaticCredentials,
        bank::BankConfig,
    },
    clap::{Parser, ValueEnum},
    rust_decimal::Decimal,
    std::path::PathBuf,
};

/// Toy bank
///
/// Opens a session, applies every command of a csv script with `op`, `name`
/// and `amount` columns and prints a report to stdout.
#[derive(Debug, Parser)]
pub struct Settings {
    /// Script to run
    #[clap(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// User opening the session
    #[clap(long, short)]
    pub user: String,

    /// Password of the user opening the session
    #[clap(long, short)]
    pub password: String,

    /// User accepted by the login check
    #[clap(long, env = "BANK_USER", default_value = "admin")]
    expected_user: String,

    /// Password accepted by the login check
    #[clap(
        long,
        env = "BANK_PASSWORD",
        default_value = "password",
        hide_env_values = true
    )]
    expected_password: String,

    /// Lowest balance of a savings account, also its opening balance
    #[clap(long, default_value = "100", value_name = "AMOUNT")]
    minimum: Decimal,

    /// Savings interest rate
    #[clap(long, default_value = "0.02", value_name = "RATE")]
    rate: Decimal,

    /// Successful savings deposits that trigger interest
    #[clap(
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    deposits_per_interest: u32,

    /// Log every balance change in account history
    #[clap(long)]
    uniform_history: bool,

    /// What to print after the script finished
    #[clap(long, value_enum, default_value = "summary")]
    pub report: Report,
}

/// Output written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    /// `name,kind,balance` per account
    Summary,
    /// `name,entry` per activity feed line
    History,
}

impl Settings {
    pub fn credentials(&self) -> StaticCredentials {
        StaticCredentials::new(&self.expected_user, &self.expected_password)
    }

    pub fn bank_config(&self) -> anyhow::Result<BankConfig> {
        ensure!(!self.minimum.is_sign_negative(), "negative minimum");
        ensure!(!self.rate.is_sign_negative(), "negative rate");

        let history = if self.uniform_history {
            HistoryMode::Uniform
        } else {
            HistoryMode::Faithful
        };

        Ok(BankConfig {
            savings: SavingsPolicy {
                minimum: self.minimum,
                rate: self.rate,
                deposits_per_interest: self.deposits_per_interest,
            },
            history,
        })
    }
}
