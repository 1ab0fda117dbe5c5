//! csv input/output format and functions

use csv_async::{AsyncWriterBuilder, Terminator};
use rust_decimal::Decimal;

use crate::account::{self, Account};
use serde::{Deserialize, Serialize};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::mpsc::Sender,
};
use tokio_stream::{Stream, StreamExt};
use tracing::warn;

// Allowed script operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum RawOp {
    Open,
    OpenSavings,
    Select,
    Deposit,
    Withdraw,
    SetBalance,
    Interest,
    Rename,
    Delete,
}

/// One line of a script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawCommand {
    pub op: RawOp,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
}

/// take a reader and continuously deserialize commands from it into `sender`.
///
/// Rows that are not valid commands are logged and skipped, read failures end the script.
pub async fn deserialize_commands_from_csv_reader<'r, R: AsyncRead + Unpin + Send + 'r>(
    input: R,
    sender: Sender<RawCommand>,
) -> anyhow::Result<()> {
    let mut builder = csv_async::AsyncReaderBuilder::new();
    builder.trim(csv_async::Trim::All);

    let mut rdr = builder.create_deserializer(input);

    let _headers = rdr.headers().await?;

    let mut records = rdr.deserialize::<RawCommand>();
    while let Some(record) = records.next().await {
        match record {
            Ok(command) => sender.send(command).await?,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|pos| pos.line());
                warn!(?line, "script row skipped: {e}");
            }
        }
    }

    Ok(())
}

/// summary of an account balance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct AccountSummary {
    pub name: String,
    pub kind: String,
    pub balance: Decimal,
}

impl<T: Account> From<T> for AccountSummary {
    fn from(oth: T) -> Self {
        let rp = 2; // round precision
        Self {
            name: oth.name().to_owned(),
            kind: oth.kind_label().to_owned(),
            balance: oth.balance().round_dp(rp),
        }
    }
}

/// single activity feed line of an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ActivityRecord {
    pub name: String,
    pub entry: String,
}

/// read items from `in_stream` and save them as [`AccountSummary`] into `wr`. Headers will be
/// included automatically. Terminator is `\r\n`
pub async fn summarize_accounts(
    in_stream: impl Stream<Item = impl account::Account> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    while let Some(acc) = in_stream.next().await {
        let acc_summary = AccountSummary::from(acc);
        wr.serialize(acc_summary).await?;
    }

    wr.flush().await?;
    Ok(())
}

/// save every record from `in_stream` into `wr` with headers, terminator is `\r\n`
pub async fn dump_activity(
    in_stream: impl Stream<Item = ActivityRecord> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    while let Some(record) = in_stream.next().await {
        wr.serialize(record).await?;
    }

    wr.flush().await?;
    Ok(())
}
