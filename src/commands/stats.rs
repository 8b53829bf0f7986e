use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{TradeRecord, TradeResult, TradeStatus};

/// Headline metrics of the history screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub win_rate: f64,
    pub net_profit: f64,
    pub best_trade: f64,
}

impl SummaryStatistics {
    /// Win rate as a whole percentage, truncated (66.7% shows as 66).
    pub fn win_rate_percent(&self) -> i64 {
        (self.win_rate * 100.0) as i64
    }

    pub fn is_strong(&self, threshold: f64) -> bool {
        self.win_rate > threshold
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub pending: usize,
    pub open_trades: usize,
    pub win_rate: f64,
    pub net_profit: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    /// Gross profit over gross loss. `None` when there are no losses but some
    /// profit, so the value survives a JSON round-trip (JSON has no infinity).
    pub profit_factor: Option<f64>,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurvePoint {
    pub date: String,
    pub cumulative_pnl: f64,
    pub daily_pnl: f64,
    pub trade_count: usize,
}

fn win_rate(wins: usize, total: usize) -> f64 {
    if total > 0 {
        wins as f64 / total as f64
    } else {
        0.0
    }
}

/// Net profit and best trade use `TradeRecord::realized_pnl`; best trade is
/// 0 for an empty set.
pub fn summarize(records: &[TradeRecord]) -> SummaryStatistics {
    let count = records.len();
    let wins = records.iter().filter(|t| t.result == TradeResult::Win).count();

    let net_profit = records.iter().map(TradeRecord::realized_pnl).sum();
    let best_trade = records
        .iter()
        .map(TradeRecord::realized_pnl)
        .reduce(f64::max)
        .unwrap_or(0.0);

    SummaryStatistics {
        count,
        win_rate: win_rate(wins, count),
        net_profit,
        best_trade,
    }
}

pub fn dashboard_stats(records: &[TradeRecord]) -> DashboardStats {
    let total_trades = records.len();
    let count_result = |r: TradeResult| records.iter().filter(|t| t.result == r).count();
    let wins = count_result(TradeResult::Win);
    let losses = count_result(TradeResult::Loss);
    let pending = count_result(TradeResult::Pending);
    let open_trades = records.iter().filter(|t| t.is_open()).count();

    let pnls: Vec<f64> = records.iter().map(TradeRecord::realized_pnl).collect();
    let net_profit: f64 = pnls.iter().sum();
    let gross_profit: f64 = pnls.iter().filter(|p| **p > 0.0).sum();
    let gross_loss: f64 = pnls.iter().filter(|p| **p < 0.0).sum::<f64>().abs();

    let profit_factor = if gross_loss > 0.0 {
        Some(gross_profit / gross_loss)
    } else if gross_profit > 0.0 {
        None
    } else {
        Some(0.0)
    };

    let best_trade = pnls.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let worst_trade = pnls.iter().copied().reduce(f64::min).unwrap_or(0.0);

    let avg_confidence = if total_trades > 0 {
        records.iter().map(|t| t.confidence).sum::<f64>() / total_trades as f64
    } else {
        0.0
    };

    DashboardStats {
        total_trades,
        wins,
        losses,
        pending,
        open_trades,
        win_rate: win_rate(wins, total_trades),
        net_profit,
        gross_profit,
        gross_loss,
        profit_factor,
        best_trade,
        worst_trade,
        avg_confidence,
    }
}

/// Daily and cumulative realized P&L of closed trades, oldest day first.
pub fn equity_curve(records: &[TradeRecord]) -> Vec<EquityCurvePoint> {
    let mut daily_map: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for trade in records.iter().filter(|t| t.status == TradeStatus::Closed) {
        let pnl = trade.realized_pnl();
        let date = trade.timestamp.format("%Y-%m-%d").to_string();
        let entry = daily_map.entry(date).or_insert((0.0, 0));
        entry.0 += pnl;
        entry.1 += 1;
    }

    let mut cumulative_pnl = 0.0;
    daily_map
        .into_iter()
        .map(|(date, (daily_pnl, trade_count))| {
            cumulative_pnl += daily_pnl;
            EquityCurvePoint {
                date,
                cumulative_pnl,
                daily_pnl,
                trade_count,
            }
        })
        .collect()
}
