use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::commands::stats::{summarize, SummaryStatistics};
use crate::models::{FilterCriteria, TradeRecord};

/// Filtered, ordered trades together with their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub trades: Vec<TradeRecord>,
    pub summary: SummaryStatistics,
}

/// Stateless: every call recomputes from the full record set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeHistoryAggregator;

impl TradeHistoryAggregator {
    pub fn filter(&self, records: &[TradeRecord], criteria: &FilterCriteria) -> Vec<TradeRecord> {
        filter_trades(records, criteria)
    }

    pub fn summarize(&self, records: &[TradeRecord]) -> SummaryStatistics {
        summarize(records)
    }

    pub fn view(&self, records: &[TradeRecord], criteria: &FilterCriteria) -> HistoryView {
        let trades = self.filter(records, criteria);
        let summary = self.summarize(&trades);
        HistoryView { trades, summary }
    }
}

/// Result filter, then timeframe, then case-insensitive search on symbol or
/// reasoning. Output is newest first; equal timestamps keep input order.
pub fn filter_trades(records: &[TradeRecord], criteria: &FilterCriteria) -> Vec<TradeRecord> {
    let threshold = criteria
        .timeframe
        .threshold(criteria.as_of.unwrap_or_else(Utc::now));
    let needle = criteria.search.to_lowercase();

    let mut filtered: Vec<TradeRecord> = records
        .iter()
        .filter(|trade| criteria.result.matches(trade.result))
        .filter(|trade| threshold.is_none_or(|since| trade.timestamp >= since))
        .filter(|trade| needle.is_empty() || trade.matches_search(&needle))
        .cloned()
        .collect();

    // sort_by is stable
    filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    log::debug!(
        "Filtered {} of {} trades (filter={}, timeframe={}, search={:?})",
        filtered.len(),
        records.len(),
        criteria.result.display_name(),
        criteria.timeframe.display_name(),
        criteria.search
    );

    filtered
}
