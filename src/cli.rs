//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_script_adapter::CsvScriptAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fixed_price_oracle::FixedPriceOracle;
use crate::adapters::text_report::{self, TextReportAdapter};
use crate::domain::account::Account;
use crate::domain::config_validation::validate_config;
use crate::domain::error::PapertraderError;
use crate::domain::runner::{run_instructions, RunSummary};
use crate::domain::statement::Statement;
use crate::ports::config_port::ConfigPort;
use crate::ports::instruction_port::InstructionSource;
use crate::ports::price_oracle::PriceOracle;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_ACCOUNT_ID: &str = "account-1";
pub const DEFAULT_OWNER: &str = "Demo User";

#[derive(Parser, Debug)]
#[command(name = "papertrader", about = "Single-account trading simulator")]
pub struct Cli {
    /// Log filter, e.g. `info` or `papertrader=debug`
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    /// `text` or `json`
    #[arg(long, global = true, default_value = "text")]
    pub log_format: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay an instruction script and write a statement
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        script: PathBuf,
        /// Statement path; `-` for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Abort at the first rejected instruction
        #[arg(long)]
        stop_on_error: bool,
    },
    /// Print current prices for symbols
    Quote {
        #[arg(short, long)]
        config: Option<PathBuf>,
        symbols: Vec<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            script,
            output,
            stop_on_error,
        } => run_script(&config, &script, output.as_ref(), stop_on_error),
        Command::Quote { config, symbols } => run_quote(config.as_ref(), &symbols),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: &PapertraderError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, PapertraderError> {
    FileConfigAdapter::from_file(path).map_err(|e| PapertraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Create the configured account and apply any `opening_deposit`.
pub fn build_account<P: PriceOracle>(
    config: &dyn ConfigPort,
    oracle: P,
) -> Result<Account<P>, PapertraderError> {
    let account_id = config
        .get_string("account", "id")
        .unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string());
    let owner = config
        .get_string("account", "owner")
        .unwrap_or_else(|| DEFAULT_OWNER.to_string());

    let mut account = Account::new(account_id, owner, oracle);
    if config.get_string("account", "opening_deposit").is_some() {
        let amount = config.get_double("account", "opening_deposit", 0.0);
        account.deposit(amount)?;
    }
    Ok(account)
}

/// The `[run] stop_on_error` setting, overridden by the command-line flag.
pub fn resolve_stop_on_error(config: &dyn ConfigPort, flag: bool) -> bool {
    flag || config.get_bool("run", "stop_on_error", false)
}

/// Run stages shared by the `run` command and its tests.
pub fn simulate(
    config: &dyn ConfigPort,
    source: &dyn InstructionSource,
    stop_on_error: bool,
) -> Result<(Statement, RunSummary), PapertraderError> {
    validate_config(config)?;
    let oracle = FixedPriceOracle::from_config(config)?;
    let mut account = build_account(config, oracle)?;
    tracing::info!(
        account_id = account.account_id(),
        owner = account.owner_name(),
        "account opened"
    );

    let instructions = source.load_instructions()?;
    let summary = run_instructions(&mut account, &instructions, stop_on_error);
    let statement = Statement::from_account(&account)?;
    Ok((statement, summary))
}

fn run_script(
    config_path: &PathBuf,
    script_path: &PathBuf,
    output_path: Option<&PathBuf>,
    stop_flag: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };
    let stop_on_error = resolve_stop_on_error(&adapter, stop_flag);

    eprintln!("Replaying {}", script_path.display());
    let source = CsvScriptAdapter::new(script_path.clone());
    let (statement, summary) = match simulate(&adapter, &source, stop_on_error) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    let output = output_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| text_report::STDOUT_PATH.to_string());
    if let Err(e) = TextReportAdapter::new().write_run(&statement, &summary, &output) {
        return fail(&e);
    }
    if output != text_report::STDOUT_PATH {
        eprintln!("Statement written to {output}");
    }

    match summary.rejected().next() {
        Some((instruction, err)) if stop_on_error => {
            eprintln!("error: run stopped at '{instruction}': {err}");
            ExitCode::from(&PapertraderError::Account(err.clone()))
        }
        _ => ExitCode::SUCCESS,
    }
}

fn run_quote(config_path: Option<&PathBuf>, symbols: &[String]) -> ExitCode {
    let oracle = match config_path {
        Some(path) => match load_config(path).and_then(|a| FixedPriceOracle::from_config(&a)) {
            Ok(o) => o,
            Err(e) => return fail(&e),
        },
        None => FixedPriceOracle::demo(),
    };

    let symbols: Vec<String> = if symbols.is_empty() {
        oracle.symbols()
    } else {
        symbols.iter().map(|s| s.to_uppercase()).collect()
    };

    let mut status = ExitCode::SUCCESS;
    for symbol in &symbols {
        match oracle.price_of(symbol) {
            Ok(price) => println!("{symbol:<8}{:>12}", text_report::format_money(price)),
            Err(e) => status = fail(&PapertraderError::Account(e)),
        }
    }
    status
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };
    match validate_config(&adapter).and_then(|()| FixedPriceOracle::from_config(&adapter)) {
        Ok(oracle) => {
            println!("Config OK ({} symbols priced)", oracle.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
