use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::HistoryError;
use crate::models::TradeRecord;

pub const BACKUP_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct BackupData {
    pub trades: Vec<TradeRecord>,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub version: String,
}

/// Records are kept as raw JSON until each one is converted on its own, so a
/// single malformed record does not sink the whole file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TradeFile {
    Records(Vec<serde_json::Value>),
    Backup {
        trades: Vec<serde_json::Value>,
        #[serde(default)]
        export_date: String,
        #[serde(default)]
        version: String,
    },
}

#[derive(Debug, Default)]
pub struct ParsedTrades {
    pub trades: Vec<TradeRecord>,
    pub errors: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IngestResult {
    pub accepted: Vec<TradeRecord>,
    pub duplicates: usize,
    pub errors: Vec<String>,
}

/// Parse a bare array of trades or a backup envelope. Only JSON that does not
/// parse, or has neither shape, fails as a whole; bad records land in `errors`.
pub fn parse_trades(json: &str) -> Result<ParsedTrades, HistoryError> {
    let items = match serde_json::from_str::<TradeFile>(json)? {
        TradeFile::Records(items) => items,
        TradeFile::Backup {
            trades,
            export_date,
            version,
        } => {
            log::debug!("Reading backup v{} exported {}", version, export_date);
            trades
        }
    };

    let mut parsed = ParsedTrades::default();
    for (i, item) in items.into_iter().enumerate() {
        let id = item
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        match serde_json::from_value::<TradeRecord>(item) {
            Ok(trade) => parsed.trades.push(trade),
            Err(e) => {
                let error = match id {
                    Some(id) => format!("record {} ({}): {}", i, id, e),
                    None => format!("record {}: {}", i, e),
                };
                log::warn!("Unreadable trade {}", error);
                parsed.errors.push(error);
            }
        }
    }

    Ok(parsed)
}

/// Validate records and drop repeated ids. Bad records are reported, not fatal.
pub fn ingest_trades(records: Vec<TradeRecord>) -> IngestResult {
    let mut result = IngestResult::default();
    let mut seen = HashSet::new();

    for trade in records {
        if let Err(e) = trade.validate() {
            log::warn!("Rejected trade: {}", e);
            result.errors.push(e.to_string());
            continue;
        }

        if !seen.insert(trade.id.clone()) {
            result.duplicates += 1;
            continue;
        }

        result.accepted.push(trade);
    }

    log::info!(
        "Ingested {} trades ({} duplicates, {} rejected)",
        result.accepted.len(),
        result.duplicates,
        result.errors.len()
    );

    result
}

/// Parse then ingest; unreadable records are reported ahead of invalid ones.
pub fn ingest_json(json: &str) -> Result<IngestResult, HistoryError> {
    let parsed = parse_trades(json)?;
    let mut result = ingest_trades(parsed.trades);
    result.errors.splice(0..0, parsed.errors);
    Ok(result)
}

pub fn load_trades(path: impl AsRef<Path>) -> Result<IngestResult, HistoryError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    log::info!("Reading trades from {:?}", path);
    ingest_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sample::sample_trades;
    use chrono::Utc;
    use std::io::Write;

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{
            "id": "TRADE-1",
            "symbol": "XAUUSD",
            "direction": "buy",
            "entry_price": 2374.5,
            "exit_price": 2380.25,
            "lot_size": 0.01,
            "profit": 57.5,
            "status": "closed",
            "timestamp": "2025-07-13T17:00:00Z",
            "confidence": 0.85,
            "reasoning": "Strong bullish momentum",
            "result": "win",
            "profit_loss": 57.5
        }]"#;

        let parsed = parse_trades(json).unwrap();
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.trades.len(), 1);
        assert_eq!(parsed.trades[0].id, "TRADE-1");
        assert_eq!(parsed.trades[0].realized_pnl(), 57.5);
    }

    #[test]
    fn test_parse_backup_envelope() {
        let backup = BackupData {
            trades: sample_trades(Utc::now()),
            export_date: Utc::now().to_rfc3339(),
            version: BACKUP_VERSION.to_string(),
        };
        let json = serde_json::to_string(&backup).unwrap();

        let parsed = parse_trades(&json).unwrap();
        assert_eq!(parsed.trades, backup.trades);
    }

    #[test]
    fn test_parse_keeps_good_records_next_to_a_malformed_one() {
        let json = r#"[
            {
                "id": "TRADE-1",
                "symbol": "XAUUSD",
                "direction": "buy",
                "entry_price": 2374.5,
                "lot_size": 0.01,
                "profit": 57.5,
                "status": "closed",
                "timestamp": "2025-07-13T17:00:00Z",
                "result": "win"
            },
            {
                "id": "TRADE-2",
                "symbol": "XAUUSD",
                "direction": "sell",
                "entry_price": 2378.0,
                "lot_size": 0.01,
                "profit": 25.0,
                "status": "closed",
                "timestamp": "2025-07-13T16:00:00Z",
                "result": "winner"
            }
        ]"#;

        let parsed = parse_trades(json).unwrap();
        assert_eq!(parsed.trades.len(), 1);
        assert_eq!(parsed.trades[0].id, "TRADE-1");
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].starts_with("record 1 (TRADE-2):"));
        assert!(parsed.errors[0].contains("winner"));

        let result = ingest_json(json).unwrap();
        assert_eq!(result.accepted.len(), 1);
        assert_eq!(result.errors, parsed.errors);
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let err = parse_trades(r#"{ "records": [] }"#).unwrap_err();
        assert!(matches!(err, HistoryError::ParseError(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_trades("{ not json").unwrap_err();
        assert!(matches!(err, HistoryError::ParseError(_)));
    }

    #[test]
    fn test_ingest_reports_invalid_and_duplicates() {
        let mut trades = sample_trades(Utc::now());
        trades.push(trades[0].clone());
        let mut bad = trades[1].clone();
        bad.id = "BAD-1".to_string();
        bad.confidence = 3.0;
        trades.push(bad);

        let result = ingest_trades(trades);
        assert_eq!(result.accepted.len(), 3);
        assert_eq!(result.duplicates, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("BAD-1"));
    }

    #[test]
    fn test_load_trades_from_file() {
        let trades = sample_trades(Utc::now());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&trades).unwrap().as_bytes())
            .unwrap();

        let result = load_trades(file.path()).unwrap();
        assert_eq!(result.accepted, trades);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_load_trades_missing_file() {
        let err = load_trades("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, HistoryError::IoError(_)));
    }
}
