use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use goldex_history::{
    export_csv_file, export_json, get_settings, load_trades, sample_trades, share_report,
    FilterCriteria, ResultFilter, TimeframeFilter, TradeHistoryAggregator,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Filter and summarize GOLDEX AI trade history")]
struct Args {
    /// JSON file with trades (plain array or backup export)
    #[arg(short, long, required_unless_present = "sample", conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Use the built-in demo history
    #[arg(long)]
    sample: bool,

    /// Result filter
    #[arg(short, long, value_enum, default_value = "all")]
    filter: FilterArg,

    /// Case-insensitive text matched against symbol and reasoning
    #[arg(short, long, default_value = "")]
    search: String,

    /// Timeframe (defaults to the one in settings)
    #[arg(short, long, value_enum)]
    timeframe: Option<TimeframeArg>,

    /// Settings JSON file
    #[arg(long, env = "GOLDEX_HISTORY_SETTINGS")]
    settings: Option<PathBuf>,

    /// Write the filtered trades as CSV
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Write the filtered trades as a JSON backup
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Print the shareable text report
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Wins,
    Losses,
}

impl From<FilterArg> for ResultFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => ResultFilter::All,
            FilterArg::Wins => ResultFilter::Wins,
            FilterArg::Losses => ResultFilter::Losses,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimeframeArg {
    Today,
    Week,
    Month,
    All,
}

impl From<TimeframeArg> for TimeframeFilter {
    fn from(arg: TimeframeArg) -> Self {
        match arg {
            TimeframeArg::Today => TimeframeFilter::Today,
            TimeframeArg::Week => TimeframeFilter::Week,
            TimeframeArg::Month => TimeframeFilter::Month,
            TimeframeArg::All => TimeframeFilter::All,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let settings = get_settings(args.settings.as_deref()).context("Failed to load settings")?;

    let records = match &args.input {
        Some(path) => {
            let ingested = load_trades(path)
                .with_context(|| format!("Failed to load trades from {:?}", path))?;
            for error in &ingested.errors {
                eprintln!("Skipped: {}", error);
            }
            ingested.accepted
        }
        None => sample_trades(Utc::now()),
    };

    let timeframe = args
        .timeframe
        .map(TimeframeFilter::from)
        .unwrap_or(settings.default_timeframe);
    let criteria = FilterCriteria::new(args.filter.into())
        .with_search(args.search)
        .with_timeframe(timeframe, None);

    let view = TradeHistoryAggregator.view(&records, &criteria);
    let summary = &view.summary;

    println!(
        "{} trades | Win Rate: {}%{} | Net P&L: {} | Best Trade: {}",
        summary.count,
        summary.win_rate_percent(),
        if summary.is_strong(settings.strong_win_rate) { " (strong)" } else { "" },
        settings.format_currency(summary.net_profit),
        settings.format_currency(summary.best_trade),
    );

    if let Some(path) = &args.export_csv {
        export_csv_file(&view.trades, path, settings.csv_delimiter_byte())
            .with_context(|| format!("Failed to export CSV to {:?}", path))?;
    }

    if let Some(path) = &args.export_json {
        let json = export_json(&view.trades).context("Failed to serialize trades")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("Wrote JSON backup to {:?}", path);
    }

    if args.report {
        println!();
        println!("{}", share_report(&view.trades, summary, &settings, &criteria));
    }

    Ok(())
}
