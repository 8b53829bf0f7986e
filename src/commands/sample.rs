use chrono::{DateTime, Duration, Utc};

use crate::models::{TradeDirection, TradeRecord, TradeResult, TradeStatus, TradingMode};

/// Demo history shown before a live feed is connected: three closed XAUUSD
/// auto trades one, two and three hours before `now`.
pub fn sample_trades(now: DateTime<Utc>) -> Vec<TradeRecord> {
    let trade = |direction: TradeDirection,
                 entry: f64,
                 exit: f64,
                 pnl: f64,
                 hours_ago: i64,
                 stop_loss: f64,
                 take_profit: f64,
                 confidence: f64,
                 reasoning: &str,
                 result: TradeResult| TradeRecord {
        id: uuid::Uuid::new_v4().to_string(),
        symbol: "XAUUSD".to_string(),
        direction,
        entry_price: entry,
        exit_price: Some(exit),
        lot_size: 0.01,
        profit: pnl,
        status: TradeStatus::Closed,
        timestamp: now - Duration::hours(hours_ago),
        mode: TradingMode::Auto,
        stop_loss: Some(stop_loss),
        take_profit: Some(take_profit),
        confidence,
        reasoning: reasoning.to_string(),
        result,
        profit_loss: Some(pnl),
    };

    vec![
        trade(
            TradeDirection::Buy,
            2374.50,
            2380.25,
            57.50,
            1,
            2365.00,
            2385.00,
            0.85,
            "Strong bullish momentum with institutional support",
            TradeResult::Win,
        ),
        trade(
            TradeDirection::Sell,
            2378.00,
            2375.50,
            25.00,
            2,
            2382.00,
            2370.00,
            0.78,
            "Resistance level rejection with volume confirmation",
            TradeResult::Win,
        ),
        trade(
            TradeDirection::Buy,
            2370.00,
            2365.75,
            -42.50,
            3,
            2365.00,
            2380.00,
            0.72,
            "False breakout, stopped out at support",
            TradeResult::Loss,
        ),
    ]
}
