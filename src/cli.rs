//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_indicator_adapter::CsvIndicatorAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::aggregate::AggregationPeriod;
use crate::domain::analysis::{run_analysis, Analysis};
use crate::domain::config::{
    StrategyConfig, Thresholds, DEFAULT_OSC_LOWER_BAND, DEFAULT_OSC_UPPER_BAND,
    DEFAULT_TREND_THRESHOLD,
};
use crate::domain::config_validation::{
    parse_optional_date, validate_data_config, validate_strategy_config,
};
use crate::domain::error::WeektraderError;
use crate::domain::indicator::{DEFAULT_MOMENTUM_LOOKBACK, DEFAULT_TREND_PERIOD};
use crate::domain::metrics::StrategyPerformance;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::indicator_port::IndicatorPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "weektrader", about = "Weekly trend/momentum strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest and compare it with buy-and-hold
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Overrides [data] symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Directory for frames.csv / trades.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            config,
            symbol,
            output,
        } => run_backtest(&config, symbol.as_deref(), output.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, WeektraderError> {
    FileConfigAdapter::from_file(path)
}

pub fn build_strategy_config(adapter: &dyn ConfigPort) -> Result<StrategyConfig, WeektraderError> {
    let aggregation_period = match adapter.get_string("strategy", "aggregation_period") {
        Some(s) => s
            .parse::<AggregationPeriod>()
            .map_err(|reason| WeektraderError::ConfigInvalid {
                section: "strategy".into(),
                key: "aggregation_period".into(),
                reason,
            })?,
        None => AggregationPeriod::default(),
    };

    Ok(StrategyConfig {
        thresholds: Thresholds {
            trend_threshold: adapter.get_double(
                "strategy",
                "trend_threshold",
                DEFAULT_TREND_THRESHOLD,
            ),
            osc_upper_band: adapter.get_double(
                "strategy",
                "osc_upper_band",
                DEFAULT_OSC_UPPER_BAND,
            ),
            osc_lower_band: adapter.get_double(
                "strategy",
                "osc_lower_band",
                DEFAULT_OSC_LOWER_BAND,
            ),
        },
        trend_period: adapter.get_period("strategy", "trend_period", DEFAULT_TREND_PERIOD),
        momentum_lookback: adapter.get_period(
            "strategy",
            "momentum_lookback",
            DEFAULT_MOMENTUM_LOOKBACK,
        ),
        aggregation_period,
        start_date: parse_optional_date(
            adapter.get_string("data", "start_date").as_deref(),
            "start_date",
        )?,
        end_date: parse_optional_date(
            adapter.get_string("data", "end_date").as_deref(),
            "end_date",
        )?,
    })
}

fn required(adapter: &dyn ConfigPort, section: &str, key: &str) -> Result<String, WeektraderError> {
    adapter
        .get_string(section, key)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| WeektraderError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

fn run_backtest(
    config_path: &Path,
    symbol_override: Option<&str>,
    output_path: Option<&Path>,
) -> Result<(), WeektraderError> {
    info!(config = %config_path.display(), "loading config");
    let adapter = load_config(config_path)?;
    validate_data_config(&adapter)?;
    validate_strategy_config(&adapter)?;
    let strategy = build_strategy_config(&adapter)?;

    let symbol = match symbol_override {
        Some(s) => s.to_string(),
        None => required(&adapter, "data", "symbol")?,
    };
    let data_port = CsvAdapter::new(PathBuf::from(required(&adapter, "data", "path")?));
    let indicator_port = CsvIndicatorAdapter::from_file(required(&adapter, "data", "indicators")?)?;

    let output = output_path.map(Path::to_path_buf).or_else(|| {
        adapter
            .get_string("report", "output_dir")
            .map(PathBuf::from)
    });
    let report = CsvReportAdapter::new(adapter.get_bool("report", "events", false));

    run_backtest_pipeline(
        &data_port,
        &indicator_port,
        &report,
        &symbol,
        &strategy,
        output.as_deref(),
    )
    .map(|_| ())
}

/// Fetch, analyse, print a summary and optionally write a report.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    indicator_port: &dyn IndicatorPort,
    report_port: &dyn ReportPort,
    symbol: &str,
    strategy: &StrategyConfig,
    output_dir: Option<&Path>,
) -> Result<Analysis, WeektraderError> {
    let daily = data_port.fetch_daily(symbol, strategy.start_date, strategy.end_date)?;
    info!(symbol, bars = daily.len(), period = %strategy.aggregation_period, "running analysis");

    let analysis = run_analysis(&daily, indicator_port, strategy)?;

    print_summary(symbol, &analysis);

    if let Some(dir) = output_dir {
        report_port.write(&analysis, dir)?;
        eprintln!("\nReport written to: {}", dir.display());
    }
    Ok(analysis)
}

fn print_summary(symbol: &str, analysis: &Analysis) {
    let first = analysis.frames.first().map(|f| f.bar.date);
    let last = analysis.frames.last().map(|f| f.bar.date);

    eprintln!("\n=== {} ===", symbol);
    if let (Some(first), Some(last)) = (first, last) {
        eprintln!("Period:           {} to {} ({} bars)", first, last, analysis.frames.len());
    }
    if let Some(warning) = &analysis.warning {
        eprintln!("Warm-up rows:     {} (no signals)", warning.rows);
    }
    match &analysis.performance {
        StrategyPerformance::NoTrades => eprintln!("Trades:           none"),
        StrategyPerformance::Traded(stats) => {
            eprintln!("Trades:           {}", stats.total_trades);
            eprintln!("Win Rate:         {:.2}%", stats.win_rate_pct);
            eprintln!("Strategy Return:  {:.2}%", stats.cumulative_return_pct);
            eprintln!("Avg Trade:        {:.2}%", stats.avg_profit_pct);
            eprintln!(
                "Best / Worst:     {:.2}% / {:.2}%",
                stats.best_trade_pct, stats.worst_trade_pct
            );
        }
    }
    eprintln!("Buy & Hold:       {:.2}%", analysis.buy_and_hold.return_pct);

    if !analysis.ledger.is_empty() {
        eprintln!("\n=== Trades ===");
        for entry in analysis.ledger.entries() {
            let t = &entry.trade;
            eprintln!(
                "  {} @ {:.2} -> {} @ {:.2}  {:+.2}%  (cum {:+.2}%)",
                t.entry_date,
                t.entry_price,
                t.exit_date,
                t.exit_price,
                t.profit_pct,
                entry.cumulative_return_pct,
            );
        }
    }
}

fn run_validate(config_path: &Path) -> Result<(), WeektraderError> {
    let adapter = load_config(config_path)?;
    validate_data_config(&adapter)?;
    validate_strategy_config(&adapter)?;
    let strategy = build_strategy_config(&adapter)?;

    eprintln!("Config validated successfully");
    eprintln!("  trend_threshold:    {}", strategy.thresholds.trend_threshold);
    eprintln!("  osc_upper_band:     {}", strategy.thresholds.osc_upper_band);
    eprintln!("  osc_lower_band:     {} (chart only)", strategy.thresholds.osc_lower_band);
    eprintln!("  trend_period:       {}", strategy.trend_period);
    eprintln!("  momentum_lookback:  {}", strategy.momentum_lookback);
    eprintln!("  aggregation_period: {}", strategy.aggregation_period);
    Ok(())
}

fn run_list_symbols(config_path: &Path) -> Result<(), WeektraderError> {
    let adapter = load_config(config_path)?;
    let data_port = CsvAdapter::new(PathBuf::from(required(&adapter, "data", "path")?));
    for symbol in data_port.list_symbols()? {
        println!("{}", symbol);
    }
    Ok(())
}
