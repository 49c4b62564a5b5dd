//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_equity_writer::CsvEquityWriter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::aggregator::run_all;
use crate::domain::config::SimulationConfig;
use crate::domain::config_validation::build_simulation_config;
use crate::domain::error::DcaSimError;
use crate::domain::summary::CurveSummary;
use crate::domain::universe::resolve_tickers;
use crate::ports::config_port::ConfigPort;
use crate::ports::equity_port::EquityPort;
use crate::ports::price_port::PricePort;

const DEFAULT_OUTPUT: &str = "data/processed/equity_curves.csv";

#[derive(Parser, Debug)]
#[command(name = "dcasim", about = "Lump sum versus dollar-cost averaging backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate both strategies and export the equity curves
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated tickers, overrides [simulation] tickers
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load a price CSV into the SQLite store
    Load {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        /// Ticker for files without a Ticker column
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Show stored date range per ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            ticker,
            output,
        } => run_simulate(&config, ticker.as_deref(), output.as_deref()),
        Command::Load {
            config,
            input,
            ticker,
        } => run_load(&config, &input, ticker.as_deref()),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, DcaSimError> {
    FileConfigAdapter::from_file(path).map_err(|e| DcaSimError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn fail(err: &DcaSimError) -> ExitCode {
    error!("{err}");
    err.into()
}

/// Opens the configured price source: `[sqlite] path` first, then `[csv] dir`.
pub fn open_price_port(config: &dyn ConfigPort) -> Result<Box<dyn PricePort>, DcaSimError> {
    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;

        if config.get_string("sqlite", "path").is_some() {
            let adapter = SqliteAdapter::from_config(config)?;
            adapter.initialize_schema()?;
            return Ok(Box::new(adapter));
        }
    }

    match config.get_string("csv", "dir") {
        Some(dir) if !dir.trim().is_empty() => Ok(Box::new(CsvAdapter::new(PathBuf::from(dir)))),
        _ => Err(DcaSimError::ConfigMissing {
            section: "csv".into(),
            key: "dir".into(),
        }),
    }
}

fn tickers_or_exit(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, ExitCode> {
    let tickers = resolve_tickers(ticker_override, config).map_err(|e| {
        fail(&DcaSimError::ConfigInvalid {
            section: "simulation".into(),
            key: "tickers".into(),
            reason: e.to_string(),
        })
    })?;
    if tickers.is_empty() {
        return Err(fail(&DcaSimError::ConfigMissing {
            section: "simulation".into(),
            key: "tickers".into(),
        }));
    }
    Ok(tickers)
}

fn run_simulate(config_path: &Path, ticker: Option<&str>, output: Option<&Path>) -> ExitCode {
    // Stage 1: Load and validate config
    info!("loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };
    let sim_config = match build_simulation_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    // Stage 2: Resolve tickers and endpoints
    let tickers = match tickers_or_exit(ticker, &adapter) {
        Ok(t) => t,
        Err(code) => return code,
    };
    let output = output
        .map(Path::to_path_buf)
        .or_else(|| adapter.get_string("output", "path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let port = match open_price_port(&adapter) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };
    let sink = CsvEquityWriter::new(output);

    // Stages 3-5: simulate, export, summarize
    run_simulation_pipeline(port.as_ref(), &sink, &tickers, &sim_config)
}

/// Simulates every ticker, writes the combined curves and prints a summary.
///
/// Succeeds when at least one ticker produced curves. When every ticker
/// fails, exits with the code of the first failure.
pub fn run_simulation_pipeline(
    port: &dyn PricePort,
    sink: &dyn EquityPort,
    tickers: &[String],
    config: &SimulationConfig,
) -> ExitCode {
    info!(
        tickers = tickers.len(),
        initial_capital = config.initial_capital,
        monthly_contribution = config.monthly_contribution,
        investment_day = config.investment_day,
        "running simulations"
    );

    let outcome = run_all(port, tickers, config);

    if outcome.results.is_empty() {
        return match outcome.failures.first() {
            Some(first) => fail(&first.error),
            None => ExitCode::from(5),
        };
    }

    if let Err(e) = sink.write_records(&outcome.records) {
        return fail(&e);
    }

    print_summary(&CurveSummary::compute_all(&outcome.results));

    if !outcome.failures.is_empty() {
        warn!(
            "simulated {} of {} tickers",
            outcome.succeeded(),
            tickers.len()
        );
        for failure in &outcome.failures {
            warn!("  {}: {}", failure.ticker, failure.error);
        }
    }

    ExitCode::SUCCESS
}

pub fn format_summary_row(s: &CurveSummary) -> String {
    format!(
        "{:<8} {:<9} {:>14.2} {:>14.2} {:>9.2}% {:>8.1}%",
        s.ticker,
        s.strategy.name(),
        s.final_invested,
        s.final_value,
        s.total_return * 100.0,
        s.max_drawdown * 100.0,
    )
}

fn print_summary(summaries: &[CurveSummary]) {
    println!(
        "{:<8} {:<9} {:>14} {:>14} {:>10} {:>9}",
        "Ticker", "Strategy", "Invested", "Value", "Return", "MaxDD"
    );
    for s in summaries {
        println!("{}", format_summary_row(s));
    }
}

fn run_load(config_path: &Path, input: &Path, ticker: Option<&str>) -> ExitCode {
    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::csv_adapter::read_price_file;
        use crate::adapters::sqlite_adapter::SqliteAdapter;
        use crate::domain::price::PricePoint;
        use std::collections::BTreeMap;

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return fail(&e),
        };
        let store = match SqliteAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => return fail(&e),
        };
        if let Err(e) = store.initialize_schema() {
            return fail(&e);
        }

        info!("reading {}", input.display());
        let rows = match read_price_file(input) {
            Ok(r) => r,
            Err(e) => return fail(&e),
        };

        let fallback = ticker.map(str::to_uppercase);
        let mut by_ticker: BTreeMap<String, Vec<PricePoint>> = BTreeMap::new();
        for row in rows {
            let Some(t) = row.ticker.or_else(|| fallback.clone()) else {
                return fail(&DcaSimError::PriceFile {
                    file: input.display().to_string(),
                    reason: "no Ticker column; pass --ticker".into(),
                });
            };
            by_ticker.entry(t).or_default().push(row.point);
        }

        for (t, points) in &by_ticker {
            if let Err(e) = store.insert_prices(t, points) {
                return fail(&e);
            }
        }

        info!("loaded {} tickers", by_ticker.len());
        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = (config_path, input, ticker);
        error!("sqlite feature is required for load");
        ExitCode::from(1)
    }
}

fn run_info(config_path: &Path, ticker: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let port = match open_price_port(&config) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    let tickers = match resolve_tickers(ticker, &config) {
        Ok(t) if !t.is_empty() => t,
        Ok(_) => match port.list_tickers() {
            Ok(t) => t,
            Err(e) => return fail(&e),
        },
        Err(e) => {
            return fail(&DcaSimError::ConfigInvalid {
                section: "simulation".into(),
                key: "tickers".into(),
                reason: e.to_string(),
            });
        }
    };

    for t in &tickers {
        match port.get_data_range(t) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{t}: {count} rows, {min_date} to {max_date}");
            }
            Ok(None) => warn!("{t}: no data found"),
            Err(e) => warn!("error querying {t}: {e}"),
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    info!("validating {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let sim = match build_simulation_config(&config) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let tickers = match tickers_or_exit(None, &config) {
        Ok(t) => t,
        Err(code) => return code,
    };

    let source = match (
        config.get_string("sqlite", "path"),
        config.get_string("csv", "dir"),
    ) {
        (Some(path), _) => format!("sqlite {path}"),
        (None, Some(dir)) => format!("csv {dir}"),
        (None, None) => {
            return fail(&DcaSimError::ConfigMissing {
                section: "csv".into(),
                key: "dir".into(),
            });
        }
    };

    println!("initial_capital:      {:.2}", sim.initial_capital);
    println!("monthly_contribution: {:.2}", sim.monthly_contribution);
    println!("investment_day:       {}", sim.investment_day);
    println!("tickers:              {}", tickers.join(", "));
    println!("price source:         {source}");
    println!("Configuration is valid.");
    ExitCode::SUCCESS
}
