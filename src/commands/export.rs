use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::commands::import::{BackupData, BACKUP_VERSION};
use crate::commands::stats::SummaryStatistics;
use crate::error::HistoryError;
use crate::models::{FilterCriteria, HistorySettings, TradeRecord, TradeResult, TradeStatus, TradingMode};

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    timestamp: String,
    symbol: &'a str,
    direction: &'static str,
    mode: &'static str,
    status: &'static str,
    result: &'static str,
    entry_price: f64,
    exit_price: Option<f64>,
    lot_size: f64,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    profit: f64,
    profit_loss: Option<f64>,
    confidence: f64,
    reasoning: &'a str,
}

impl<'a> From<&'a TradeRecord> for CsvRow<'a> {
    fn from(trade: &'a TradeRecord) -> Self {
        CsvRow {
            id: &trade.id,
            timestamp: trade.timestamp.to_rfc3339(),
            symbol: &trade.symbol,
            direction: trade.direction.display_name(),
            mode: match trade.mode {
                TradingMode::Auto => "Auto",
                TradingMode::Manual => "Manual",
            },
            status: match trade.status {
                TradeStatus::Open => "Open",
                TradeStatus::Closed => "Closed",
            },
            result: match trade.result {
                TradeResult::Win => "Win",
                TradeResult::Loss => "Loss",
                TradeResult::Pending => "Pending",
            },
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            lot_size: trade.lot_size,
            stop_loss: trade.stop_loss,
            take_profit: trade.take_profit,
            profit: trade.profit,
            profit_loss: trade.profit_loss,
            confidence: trade.confidence,
            reasoning: &trade.reasoning,
        }
    }
}

/// Writes a header and one row per trade in the given order. Returns the row count.
pub fn export_csv<W: Write>(
    trades: &[TradeRecord],
    writer: W,
    delimiter: u8,
) -> Result<usize, HistoryError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    for trade in trades {
        wtr.serialize(CsvRow::from(trade))?;
    }
    wtr.flush()?;

    Ok(trades.len())
}

pub fn export_csv_string(trades: &[TradeRecord], delimiter: u8) -> Result<String, HistoryError> {
    let mut buf = Vec::new();
    export_csv(trades, &mut buf, delimiter)?;
    String::from_utf8(buf).map_err(|e| HistoryError::CsvError(e.to_string()))
}

pub fn export_csv_file(
    trades: &[TradeRecord],
    path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<usize, HistoryError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let rows = export_csv(trades, std::io::BufWriter::new(file), delimiter)?;
    log::info!("Exported {} trades to {:?}", rows, path);
    Ok(rows)
}

/// Pretty JSON backup of the given trades, readable by `parse_trades`.
pub fn export_json(trades: &[TradeRecord]) -> Result<String, HistoryError> {
    let backup = BackupData {
        trades: trades.to_vec(),
        export_date: Utc::now().to_rfc3339(),
        version: BACKUP_VERSION.to_string(),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

pub fn share_report(
    trades: &[TradeRecord],
    summary: &SummaryStatistics,
    settings: &HistorySettings,
    criteria: &FilterCriteria,
) -> String {
    let mut lines = vec![
        format!(
            "GOLDEX AI Trade Report ({}, {})",
            criteria.result.display_name(),
            criteria.timeframe.display_name()
        ),
        format!("Total Trades: {}", summary.count),
        format!("Win Rate: {}%", summary.win_rate_percent()),
        format!("Net P&L: {}", settings.format_currency(summary.net_profit)),
        format!("Best Trade: {}", settings.format_currency(summary.best_trade)),
    ];

    if !criteria.search.is_empty() {
        lines.insert(1, format!("Search: \"{}\"", criteria.search));
    }

    if !trades.is_empty() {
        lines.push(String::new());
    }
    for trade in trades {
        lines.push(format!(
            "{} {} {} @ {:.2} -> {}{}",
            trade.timestamp.format("%Y-%m-%d %H:%M"),
            trade.symbol,
            trade.direction.display_name(),
            trade.entry_price,
            settings.format_currency(trade.realized_pnl()),
            if trade.is_open() { " (open)" } else { "" }
        ));
    }

    lines.join("\n")
}
