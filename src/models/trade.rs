use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn display_name(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "Buy",
            TradeDirection::Sell => "Sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    Manual,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeResult {
    Win,
    Loss,
    #[default]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub symbol: String,
    pub direction: TradeDirection,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    pub lot_size: f64,
    pub profit: f64,
    pub status: TradeStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub mode: TradingMode,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub result: TradeResult,
    #[serde(default)]
    pub profit_loss: Option<f64>,
}

fn default_confidence() -> f64 {
    0.5
}

impl TradeRecord {
    /// P&L used for every sum and maximum over a trade set: `profit_loss`
    /// when present, otherwise `profit`.
    pub fn realized_pnl(&self) -> f64 {
        self.profit_loss.unwrap_or(self.profit)
    }

    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.symbol.to_lowercase().contains(needle)
            || self.reasoning.to_lowercase().contains(needle)
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// Ingestion-boundary checks. The aggregator assumes records passed these.
    pub fn validate(&self) -> Result<(), HistoryError> {
        let fail = |reason: String| HistoryError::ValidationError {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(fail("id is empty".to_string()));
        }
        if self.symbol.trim().is_empty() {
            return Err(fail("symbol is empty".to_string()));
        }
        if !(self.entry_price > 0.0) {
            return Err(fail(format!("entry price must be positive, got {}", self.entry_price)));
        }
        if !(self.lot_size > 0.0) {
            return Err(fail(format!("lot size must be positive, got {}", self.lot_size)));
        }
        for (name, value) in [
            ("exit price", self.exit_price),
            ("stop loss", self.stop_loss),
            ("take profit", self.take_profit),
        ] {
            if let Some(v) = value {
                if !(v > 0.0) {
                    return Err(fail(format!("{} must be positive, got {}", name, v)));
                }
            }
        }
        if self.exit_price.is_some() && self.status != TradeStatus::Closed {
            return Err(fail("trade has an exit price but is not closed".to_string()));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(fail(format!("confidence {} outside [0, 1]", self.confidence)));
        }

        let pnl = self.realized_pnl();
        match self.result {
            TradeResult::Win if pnl < 0.0 => {
                return Err(fail(format!("marked as win with negative P&L {:.2}", pnl)));
            }
            TradeResult::Loss if pnl >= 0.0 => {
                return Err(fail(format!("marked as loss with non-negative P&L {:.2}", pnl)));
            }
            _ => {}
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFilter {
    #[default]
    All,
    Wins,
    Losses,
}

impl ResultFilter {
    pub fn display_name(&self) -> &'static str {
        match self {
            ResultFilter::All => "All",
            ResultFilter::Wins => "Wins",
            ResultFilter::Losses => "Losses",
        }
    }

    pub fn matches(&self, result: TradeResult) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Wins => result == TradeResult::Win,
            ResultFilter::Losses => result == TradeResult::Loss,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeframeFilter {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl TimeframeFilter {
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeframeFilter::Today => "Today",
            TimeframeFilter::Week => "Week",
            TimeframeFilter::Month => "Month",
            TimeframeFilter::All => "All Time",
        }
    }

    /// Earliest timestamp kept by this timeframe, relative to `now`.
    pub fn threshold(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeframeFilter::Today => now.date_naive().and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            TimeframeFilter::Week => Some(now - Duration::days(7)),
            TimeframeFilter::Month => Some(now - Duration::days(30)),
            TimeframeFilter::All => None,
        }
    }
}

/// User-selected narrowing of the history list. Rebuilt per view session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub result: ResultFilter,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub timeframe: TimeframeFilter,
    /// Anchor for the timeframe window; the current time when unset.
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    pub fn new(result: ResultFilter) -> Self {
        Self {
            result,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_timeframe(mut self, timeframe: TimeframeFilter, as_of: Option<DateTime<Utc>>) -> Self {
        self.timeframe = timeframe;
        self.as_of = as_of;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn closed_trade(result: TradeResult, profit: f64, profit_loss: Option<f64>) -> TradeRecord {
        TradeRecord {
            id: "T-1".to_string(),
            symbol: "XAUUSD".to_string(),
            direction: TradeDirection::Buy,
            entry_price: 2374.50,
            exit_price: Some(2380.25),
            lot_size: 0.01,
            profit,
            status: TradeStatus::Closed,
            timestamp: Utc.with_ymd_and_hms(2025, 7, 13, 12, 0, 0).unwrap(),
            mode: TradingMode::Auto,
            stop_loss: Some(2365.00),
            take_profit: Some(2385.00),
            confidence: 0.85,
            reasoning: "Strong bullish momentum".to_string(),
            result,
            profit_loss,
        }
    }

    #[test]
    fn test_realized_pnl_prefers_profit_loss() {
        let trade = closed_trade(TradeResult::Win, 10.0, Some(12.5));
        assert_eq!(trade.realized_pnl(), 12.5);

        let trade = closed_trade(TradeResult::Win, 10.0, None);
        assert_eq!(trade.realized_pnl(), 10.0);
    }

    #[test]
    fn test_open_trade_without_profit_loss_falls_back_to_profit() {
        let mut trade = closed_trade(TradeResult::Pending, 3.0, None);
        trade.status = TradeStatus::Open;
        trade.exit_price = None;
        assert_eq!(trade.realized_pnl(), 3.0);
        assert!(trade.validate().is_ok());

        let trade = closed_trade(TradeResult::Loss, 4.0, None);
        assert!(trade.validate().is_err(), "loss checked against the profit fallback");
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        let mut trade = closed_trade(TradeResult::Win, 57.5, Some(57.5));
        assert!(trade.validate().is_ok());

        trade.confidence = 1.2;
        assert!(trade.validate().is_err());

        let mut trade = closed_trade(TradeResult::Win, 57.5, Some(57.5));
        trade.lot_size = -0.01;
        assert!(trade.validate().is_err());

        let mut trade = closed_trade(TradeResult::Win, 57.5, Some(57.5));
        trade.entry_price = 0.0;
        assert!(trade.validate().is_err());

        let mut trade = closed_trade(TradeResult::Win, 57.5, Some(57.5));
        trade.status = TradeStatus::Open;
        assert!(trade.validate().is_err(), "exit price on an open trade");
    }

    #[test]
    fn test_validate_checks_result_against_pnl() {
        let trade = closed_trade(TradeResult::Win, -5.0, Some(-5.0));
        let err = trade.validate().unwrap_err();
        assert!(err.to_string().contains("win"));

        let trade = closed_trade(TradeResult::Loss, 0.0, Some(0.0));
        assert!(trade.validate().is_err());

        let trade = closed_trade(TradeResult::Win, 0.0, Some(0.0));
        assert!(trade.validate().is_ok(), "break-even counts as a win");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let trade = closed_trade(TradeResult::Win, 1.0, None);
        assert!(trade.matches_search("xau"));
        assert!(trade.matches_search("bullish mom"));
        assert!(!trade.matches_search("eurusd"));
    }

    #[test]
    fn test_timeframe_thresholds() {
        let now = Utc.with_ymd_and_hms(2025, 7, 13, 15, 30, 0).unwrap();
        assert_eq!(
            TimeframeFilter::Today.threshold(now),
            Some(Utc.with_ymd_and_hms(2025, 7, 13, 0, 0, 0).unwrap())
        );
        assert_eq!(
            TimeframeFilter::Week.threshold(now),
            Some(Utc.with_ymd_and_hms(2025, 7, 6, 15, 30, 0).unwrap())
        );
        assert_eq!(
            TimeframeFilter::Month.threshold(now),
            Some(Utc.with_ymd_and_hms(2025, 6, 13, 15, 30, 0).unwrap())
        );
        assert_eq!(TimeframeFilter::All.threshold(now), None);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let json = r#"{
            "id": "T-9",
            "symbol": "XAUUSD",
            "direction": "sell",
            "entry_price": 2378.0,
            "lot_size": 0.01,
            "profit": 0.0,
            "status": "open",
            "timestamp": "2025-07-13T10:00:00Z"
        }"#;

        let trade: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trade.mode, TradingMode::Auto);
        assert_eq!(trade.result, TradeResult::Pending);
        assert_eq!(trade.confidence, 0.5);
        assert!(trade.reasoning.is_empty());
        assert!(trade.profit_loss.is_none());
    }
}
