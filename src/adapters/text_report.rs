//! Plain-text account statement.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::error::PapertraderError;
use crate::domain::runner::RunSummary;
use crate::domain::statement::Statement;
use crate::domain::transaction::Transaction;
use crate::ports::report_port::ReportPort;

/// Output path that sends the statement to stdout.
pub const STDOUT_PATH: &str = "-";

const NOT_APPLICABLE: &str = "N/A";

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, statement: &Statement, output_path: &str) -> Result<(), PapertraderError> {
        emit(&render_statement(statement), output_path)
    }

    fn write_run(
        &self,
        statement: &Statement,
        summary: &RunSummary,
        output_path: &str,
    ) -> Result<(), PapertraderError> {
        let mut text = render_statement(statement);
        text.push_str(&render_run_summary(summary));
        emit(&text, output_path)
    }
}

fn emit(text: &str, output_path: &str) -> Result<(), PapertraderError> {
    if output_path == STDOUT_PATH {
        print!("{text}");
        return Ok(());
    }
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(PapertraderError::Io)?;
    }
    fs::write(path, text).map_err(PapertraderError::Io)?;
    Ok(())
}

/// Two decimals with comma thousands separators, e.g. `-1,234.50`.
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

pub fn render_statement(statement: &Statement) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Account statement: {} ({})", statement.account_id, statement.owner_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<18}{:>16}", "Cash balance", format_money(statement.cash_balance));
    let _ = writeln!(out, "  {:<18}{:>16}", "Holdings value", format_money(statement.holdings_value()));
    let _ = writeln!(out, "  {:<18}{:>16}", "Portfolio value", format_money(statement.portfolio_value));
    let _ = writeln!(out, "  {:<18}{:>16}", "Total deposited", format_money(statement.total_deposited));
    let _ = writeln!(out, "  {:<18}{:>16}", "Profit/loss", format_money(statement.profit_loss));
    let _ = writeln!(out);

    let _ = writeln!(out, "Holdings");
    if statement.holdings.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(out, "  {:<8}{:>10}{:>14}{:>16}", "Symbol", "Quantity", "Price", "Value");
        for h in &statement.holdings {
            let _ = writeln!(
                out,
                "  {:<8}{:>10}{:>14}{:>16}",
                h.symbol,
                h.quantity,
                format_money(h.price),
                format_money(h.market_value)
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Transactions (most recent first)");
    if statement.transactions.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(
            out,
            "  {:<20}{:<10}{:>14}{:>8}{:>10}{:>14}",
            "Timestamp", "Type", "Amount", "Symbol", "Quantity", "Share price"
        );
        for tx in statement.transactions.iter().rev() {
            let _ = writeln!(out, "{}", render_transaction(tx));
        }
    }

    out
}

fn render_transaction(tx: &Transaction) -> String {
    let quantity = tx
        .quantity()
        .map(|q| q.to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string());
    let price = tx
        .price_per_share()
        .map(format_money)
        .unwrap_or_else(|| NOT_APPLICABLE.to_string());
    format!(
        "  {:<20}{:<10}{:>14}{:>8}{:>10}{:>14}",
        tx.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
        tx.kind().label(),
        format_money(tx.cash_delta()),
        tx.symbol().unwrap_or(NOT_APPLICABLE),
        quantity,
        price
    )
}

pub fn render_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Run: {} applied, {} rejected{}",
        summary.applied_count(),
        summary.rejected_count(),
        if summary.stopped_early {
            " (stopped early)"
        } else {
            ""
        }
    );
    for (instruction, err) in summary.rejected() {
        let _ = writeln!(out, "  rejected: {instruction}: {err}");
    }
    out
}
