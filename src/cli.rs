//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::csv_adapter::{write_markers, CsvAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::validate_signal_config;
use crate::domain::error::SignalError;
use crate::domain::report::{summarize, SignalReport};
use crate::domain::signal::run_signals;
use crate::domain::strategy::SignalParams;
use crate::ports::flow_data_port::FlowDataPort;
use crate::ports::market_data_port::MarketDataPort;

#[derive(Parser, Debug)]
#[command(name = "trendsignal", about = "Trend-following buy/sell marker generator")]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute chart markers for one symbol
    Signals {
        #[arg(long)]
        data_dir: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate the [signal] section of a config file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Signals {
            data_dir,
            symbol,
            start,
            end,
            config,
            output,
        } => run_signals_command(
            &data_dir,
            &symbol,
            start.unwrap_or(NaiveDate::MIN),
            end.unwrap_or(NaiveDate::MAX),
            config.as_deref(),
            output.as_deref(),
        ),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set and no `-v` was given; otherwise the level follows
/// the verbosity count. A second call is a no-op.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init();
}

/// Load and validate strategy parameters, falling back to defaults without a file.
pub fn load_params(config_path: Option<&Path>) -> Result<SignalParams, SignalError> {
    let Some(path) = config_path else {
        return Ok(SignalParams::default());
    };
    let adapter = FileConfigAdapter::from_file(path)?;
    validate_signal_config(&adapter)?;
    Ok(SignalParams::from_config(&adapter))
}

/// Fetch data for `symbol`, run the signal pass and write markers to `out`.
pub fn run_signals_pipeline(
    market: &dyn MarketDataPort,
    flows: &dyn FlowDataPort,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    params: &SignalParams,
    out: &mut dyn Write,
) -> Result<SignalReport, SignalError> {
    let candles = market.fetch_candles(symbol, start, end)?;
    let flow_records = flows.fetch_flows(symbol, start, end)?;
    tracing::info!(
        %symbol,
        candles = candles.len(),
        flow_days = flow_records.len(),
        "running signal pass"
    );

    if candles.len() < params.warmup_bars {
        tracing::warn!(
            %symbol,
            candles = candles.len(),
            required = params.warmup_bars,
            "not enough history for signals"
        );
    }

    let run = run_signals(&candles, &flow_records, params);
    write_markers(&mut *out, &run.markers)?;
    Ok(summarize(&run))
}

fn run_signals_command(
    data_dir: &Path,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    config_path: Option<&Path>,
    output_path: Option<&Path>,
) -> Result<(), SignalError> {
    let params = load_params(config_path)?;
    let adapter = CsvAdapter::new(data_dir.to_path_buf());

    let report = match output_path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            let report =
                run_signals_pipeline(&adapter, &adapter, symbol, start, end, &params, &mut out)?;
            out.flush()?;
            report
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_signals_pipeline(&adapter, &adapter, symbol, start, end, &params, &mut out)?
        }
    };

    eprintln!("{symbol}: {report}");
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), SignalError> {
    eprintln!("Validating config: {}", config_path.display());
    let params = load_params(Some(config_path))?;
    eprintln!(
        "[signal] ok: warmup {} bars, grace {} days, stops {}x/{}x ATR, breakout lookback {}",
        params.warmup_bars,
        params.grace_days,
        params.hard_stop_atr,
        params.trailing_atr,
        params.breakout_lookback
    );
    Ok(())
}
