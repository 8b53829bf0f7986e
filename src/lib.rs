//! Trade history core of the GOLDEX AI assistant: filters and orders trade
//! records, derives summary statistics, and exports the filtered set.

pub mod commands;
pub mod error;
pub mod models;

pub use commands::{
    dashboard_stats, equity_curve, export_csv, export_csv_file, export_csv_string, export_json,
    filter_trades, get_settings, ingest_json, ingest_trades, load_trades, parse_trades, sample_trades,
    share_report, summarize, update_settings, DashboardStats, EquityCurvePoint, HistoryView,
    IngestResult, ParsedTrades, SummaryStatistics, TradeHistoryAggregator,
};
pub use error::HistoryError;
pub use models::{
    FilterCriteria, HistorySettings, ResultFilter, TimeframeFilter, TradeDirection, TradeRecord,
    TradeResult, TradeStatus, TradingMode, UpdateSettingsInput,
};
