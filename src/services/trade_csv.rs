use anyhow::{Context, Error, Result};
use csv::{Reader, Writer};
use tracing::{info, warn};

use crate::{
    app::{
        Ledger,
        utils::{parse_date, parse_decimal},
        validation::validate_trade_row,
    },
    db::KeyValueStore,
    models::{TradeRecord, TradeType},
};

use super::MarketDataProvider;

const EXPORT_HEADER: [&str; 8] = [
    "id",
    "date",
    "fund_code",
    "fund_name",
    "type",
    "amount",
    "shares",
    "nav",
];

const IMPORT_COLUMNS: usize = 6;

pub fn export_trades(path: &str, trades: &[TradeRecord]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file at path: {}", path))?;

    writer
        .write_record(EXPORT_HEADER)
        .context("Failed to write CSV header")?;

    for trade in trades {
        writer
            .write_record([
                trade.id().to_string(),
                trade.date().format("%Y-%m-%d").to_string(),
                trade.fund_code().to_string(),
                trade.fund_name().to_string(),
                trade.trade_type().to_string(),
                trade.amount().to_string(),
                trade.shares().to_string(),
                trade.nav().to_string(),
            ])
            .with_context(|| format!("Failed to write trade {}", trade.id()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file at path: {}", path))?;

    info!(path, trades = trades.len(), "exported trades");
    Ok(())
}

/// Replays `date,type,fund_code,fund_name,amount_or_shares,nav` rows through
/// the ledger in file order. Returns the number of rows applied.
///
/// Unparseable rows abort the import. Rows that parse but fail validation,
/// such as a negative amount, are skipped.
pub async fn import_trades<S, P>(path: &str, ledger: &mut Ledger<S, P>) -> Result<usize>
where
    S: KeyValueStore,
    P: MarketDataProvider,
{
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file at path: {}", path))?;

    let mut applied = 0;
    for (row_idx, record) in reader.records().enumerate() {
        let row = row_idx + 1;
        let rec = record.with_context(|| format!("Failed to read CSV record at row {}", row))?;

        if rec.len() < IMPORT_COLUMNS {
            return Err(Error::msg(format!(
                "Invalid CSV format at row {}: expected at least {} columns, found {}",
                row,
                IMPORT_COLUMNS,
                rec.len()
            )));
        }

        let date = parse_date(&rec[0]).with_context(|| format!("Invalid row {}", row))?;

        let trade_type = match rec[1].trim().parse::<TradeType>() {
            Ok(trade_type) => trade_type,
            Err(_) => {
                warn!(row, trade_type = &rec[1], "skipping unknown trade type");
                continue;
            }
        };

        let name = rec[3].trim();
        let quantity = parse_decimal(&rec[4], "amount or shares")
            .with_context(|| format!("Invalid row {}", row))?;
        let nav = parse_decimal(&rec[5], "nav").with_context(|| format!("Invalid row {}", row))?;

        let trade = match validate_trade_row(trade_type, &rec[2], quantity, nav) {
            Ok(trade) => trade,
            Err(e) => {
                warn!(row, error = %e, "skipping invalid row");
                continue;
            }
        };
        let code = trade.code().as_str();

        let outcome = match trade_type {
            TradeType::Buy => {
                ledger
                    .buy_on(date, code, name, *trade.quantity(), *trade.nav())
                    .await
            }
            TradeType::Sell => {
                ledger
                    .sell_on(date, code, *trade.quantity(), *trade.nav())
                    .await
            }
        };

        if outcome.changed_state() {
            applied += 1;
        } else {
            warn!(row, code, ?outcome, "row had no effect");
        }
    }

    info!(path, applied, "imported trades");
    Ok(applied)
}
