//! CLI integration tests for the `run` command orchestration.
//!
//! Tests cover:
//! - Account construction from config (identity defaults, opening deposit)
//! - Price table resolution from real INI files on disk
//! - Full simulate pipeline with a CSV script on disk
//! - Stop-on-error resolution and early termination
//! - Command dispatch exit codes

mod common;

use approx::assert_abs_diff_eq;
use common::*;
use papertrader::adapters::csv_script_adapter::CsvScriptAdapter;
use papertrader::adapters::file_config_adapter::FileConfigAdapter;
use papertrader::adapters::fixed_price_oracle::FixedPriceOracle;
use papertrader::cli::{self, Cli, Command};
use papertrader::domain::error::{AccountError, PapertraderError};
use papertrader::ports::price_oracle::PriceOracle;
use std::path::PathBuf;
use std::process::ExitCode;

const VALID_INI: &str = r#"
[account]
id = acc-100
owner = Casey
opening_deposit = 1000

[prices]
AAPL = 150.00
MSFT = 400.00

[run]
stop_on_error = false
"#;

const SCRIPT: &str = "\
action,amount,symbol,quantity
buy,,AAPL,4
sell,,AAPL,2
buy,,TSLA,1
withdraw,100,,
";

fn script_source(content: &str) -> (tempfile::NamedTempFile, CsvScriptAdapter) {
    let file = write_temp_file(content);
    let adapter = CsvScriptAdapter::new(file.path().to_path_buf());
    (file, adapter)
}

mod account_config {
    use super::*;

    #[test]
    fn build_account_uses_configured_identity() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let account = cli::build_account(&config, sample_oracle()).unwrap();

        assert_eq!(account.account_id(), "acc-100");
        assert_eq!(account.owner_name(), "Casey");
        assert_abs_diff_eq!(account.cash_balance(), 1000.0);
        assert_abs_diff_eq!(account.total_deposited(), 1000.0);
        assert_eq!(account.transaction_count(), 1);
    }

    #[test]
    fn build_account_defaults() {
        let config = FileConfigAdapter::from_string("[run]\n").unwrap();
        let account = cli::build_account(&config, sample_oracle()).unwrap();

        assert_eq!(account.account_id(), cli::DEFAULT_ACCOUNT_ID);
        assert_eq!(account.owner_name(), cli::DEFAULT_OWNER);
        assert_eq!(account.cash_balance(), 0.0);
        assert_eq!(account.transaction_count(), 0);
    }

    #[test]
    fn build_account_rejects_bad_opening_deposit() {
        let config =
            FileConfigAdapter::from_string("[account]\nopening_deposit = -5\n").unwrap();
        let err = cli::build_account(&config, sample_oracle()).unwrap_err();
        assert!(matches!(
            err,
            PapertraderError::Account(AccountError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn price_table_from_file_on_disk() {
        let file = write_temp_file(VALID_INI);
        let config = cli::load_config(&file.path().to_path_buf()).unwrap();
        let oracle = FixedPriceOracle::from_config(&config).unwrap();

        assert_eq!(oracle.symbols(), ["AAPL", "MSFT"]);
        assert_eq!(oracle.price_of("MSFT"), Ok(400.0));
        assert!(oracle.price_of("TSLA").is_err());
    }

    #[test]
    fn load_config_missing_file_is_config_parse() {
        let err = cli::load_config(&PathBuf::from("/nonexistent/papertrader.ini")).unwrap_err();
        assert!(matches!(err, PapertraderError::ConfigParse { .. }));
        assert_eq!(ExitCode::from(&err), ExitCode::from(2));
    }

    #[test]
    fn stop_on_error_flag_overrides_config() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        assert!(!cli::resolve_stop_on_error(&config, false));
        assert!(cli::resolve_stop_on_error(&config, true));

        let config = FileConfigAdapter::from_string("[run]\nstop_on_error = yes\n").unwrap();
        assert!(cli::resolve_stop_on_error(&config, false));
    }
}

mod simulate_pipeline {
    use super::*;

    #[test]
    fn replays_script_and_builds_statement() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let (_file, source) = script_source(SCRIPT);

        let (statement, summary) = cli::simulate(&config, &source, false).unwrap();

        assert_eq!(summary.applied_count(), 3);
        assert_eq!(summary.rejected_count(), 1);
        let (instruction, err) = summary.rejected().next().unwrap();
        assert_eq!(instruction.to_string(), "buy 1 TSLA");
        assert!(matches!(err, AccountError::UnknownSymbol { .. }));

        assert_eq!(statement.account_id, "acc-100");
        assert_abs_diff_eq!(statement.cash_balance, 600.0);
        assert_abs_diff_eq!(statement.portfolio_value, 900.0);
        assert_abs_diff_eq!(statement.profit_loss, -100.0);
        assert_eq!(statement.holdings.len(), 1);
        assert_eq!(statement.holdings[0].quantity, 2);
        assert_eq!(statement.transactions.len(), 4);
    }

    #[test]
    fn stop_on_error_halts_replay() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let (_file, source) = script_source(SCRIPT);

        let (statement, summary) = cli::simulate(&config, &source, true).unwrap();

        assert!(summary.stopped_early);
        assert_eq!(summary.steps.len(), 3);
        assert_abs_diff_eq!(statement.cash_balance, 700.0);
    }

    #[test]
    fn demo_prices_when_section_absent() {
        let config = FileConfigAdapter::from_string("[account]\nopening_deposit = 500\n").unwrap();
        let (_file, source) = script_source("action,amount,symbol,quantity\nbuy,,TSLA,2\n");

        let (statement, summary) = cli::simulate(&config, &source, false).unwrap();
        assert_eq!(summary.rejected_count(), 0);
        assert_eq!(statement.cash_balance, 0.0);
        assert_eq!(statement.portfolio_value, 500.0);
    }

    #[test]
    fn invalid_config_stops_before_replay() {
        let config = FileConfigAdapter::from_string("[prices]\naapl = -1\n").unwrap();
        let (_file, source) = script_source(SCRIPT);

        let err = cli::simulate(&config, &source, false).unwrap_err();
        assert!(matches!(err, PapertraderError::ConfigInvalid { .. }));
    }

    #[test]
    fn malformed_script_is_script_error() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let (_file, source) = script_source("action,amount,symbol,quantity\nshort,,AAPL,1\n");

        let err = cli::simulate(&config, &source, false).unwrap_err();
        assert!(matches!(err, PapertraderError::ScriptParse { line: 2, .. }));
        assert_eq!(ExitCode::from(&err), ExitCode::from(3));
    }
}

mod dispatch {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: "warn".into(),
            log_format: "text".into(),
            command,
        }
    }

    #[test]
    fn run_writes_statement_file() {
        let config = write_temp_file(VALID_INI);
        let script = write_temp_file(SCRIPT);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/statement.txt");

        let code = cli::run(cli(Command::Run {
            config: config.path().to_path_buf(),
            script: script.path().to_path_buf(),
            output: Some(output.clone()),
            stop_on_error: false,
        }));

        assert_eq!(code, ExitCode::SUCCESS);
        let contents = std::fs::read_to_string(&output).unwrap();
        assert!(contents.contains("Account statement: acc-100 (Casey)"));
        assert!(contents.contains("rejected: buy 1 TSLA: unknown symbol: TSLA"));
    }

    #[test]
    fn run_with_stop_on_error_exits_with_account_code() {
        let config = write_temp_file(VALID_INI);
        let script = write_temp_file(SCRIPT);
        let dir = tempfile::tempdir().unwrap();

        let code = cli::run(cli(Command::Run {
            config: config.path().to_path_buf(),
            script: script.path().to_path_buf(),
            output: Some(dir.path().join("statement.txt")),
            stop_on_error: true,
        }));

        assert_eq!(code, ExitCode::from(4));
    }

    #[test]
    fn validate_accepts_good_config() {
        let config = write_temp_file(VALID_INI);
        let code = cli::run(cli(Command::Validate {
            config: config.path().to_path_buf(),
        }));
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn validate_rejects_bad_config() {
        let config = write_temp_file("[run]\nstop_on_error = perhaps\n");
        let code = cli::run(cli(Command::Validate {
            config: config.path().to_path_buf(),
        }));
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn quote_unknown_symbol_fails() {
        let code = cli::run(cli(Command::Quote {
            config: None,
            symbols: vec!["aapl".into(), "nope".into()],
        }));
        assert_eq!(code, ExitCode::from(4));
    }

    #[test]
    fn quote_known_symbols_succeeds() {
        let code = cli::run(cli(Command::Quote {
            config: None,
            symbols: Vec::new(),
        }));
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
