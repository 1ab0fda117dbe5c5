//! # Bank-accounts
//! Application applies account commands from input csv file and prints accounts to output.
//!
//! ## Input format
//! csv with columns `op`, `name`, `amount`
//!
//! ```csv
//! op,name,amount
//! open_savings,bob,
//! select,bob,
//! deposit,,10
//! ```

#![deny(missing_docs)]

use anyhow::Context;
use bank_accounts::{
    auth::CredentialValidator,
    bank::Bank,
    csv::{self, RawCommand},
};
use clap::Parser;
use futures::StreamExt;
use settings::{Report, Settings};
use std::path::PathBuf;
use tokio::{
    io::{stdout, BufReader},
    spawn,
    sync::mpsc::{channel, Receiver, Sender},
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod settings;

async fn read_commands_from_file(
    filename: PathBuf,
    sender: Sender<RawCommand>,
) -> anyhow::Result<()> {
    let f = tokio::fs::File::open(filename)
        .await
        .context("access input file")?;

    let bf = BufReader::new(f);
    csv::deserialize_commands_from_csv_reader(bf, sender)
        .await
        .context("improper content of file")
}

// single owner of the bank, commands are applied in script order
async fn run_bank(input: Receiver<RawCommand>, bank: Bank) -> Bank {
    let mut bank = bank;
    let mut commands = ReceiverStream::new(input);

    let mut command_no: u64 = 0;
    while let Some(command) = commands.next().await {
        command_no += 1;
        let op = command.op;
        if let Err(e) = bank.try_apply_command(command) {
            warn!(command_no, ?op, "command skipped: {e}");
        }
    }
    bank
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // configure logging, stdout is reserved for the report
    let filter = EnvFilter::try_from_default_env();
    let filter = filter.unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // gather CLI parameters
    let settings = Settings::parse();
    let config = settings.bank_config()?;
    info!(savings = ?config.savings, history = ?config.history, "startup settings");

    settings
        .credentials()
        .validate(&settings.user, &settings.password)
        .context("login refused")?;

    // read commands from csv file
    let (tx_commands, rx_commands) = channel(8192);
    let reader = read_commands_from_file(settings.script.clone(), tx_commands);
    let task_read_csv = spawn(reader);

    // apply them to accounts
    let task_bank = spawn(run_bank(rx_commands, Bank::new(config)));

    // await for each task to complete and handle it errors if occurred
    task_read_csv.await??;
    let bank = task_bank.await?;
    info!(accounts = bank.len(), "script finished");

    let written = match settings.report {
        Report::Summary => {
            let accounts = tokio_stream::iter(bank.accounts());
            csv::summarize_accounts(accounts, stdout()).await
        }
        Report::History => {
            let records = tokio_stream::iter(bank.activity_records());
            csv::dump_activity(records, stdout()).await
        }
    };
    written.context("failed to save output")?;

    Ok(())
}
