//! CSV instruction script adapter.
//!
//! Expected header: `action,amount,symbol,quantity`. Cash actions fill
//! `amount`; share actions fill `symbol` and `quantity`. Lines starting
//! with `#` are ignored.

use crate::domain::error::PapertraderError;
use crate::domain::instruction::Instruction;
use crate::ports::instruction_port::InstructionSource;
use std::fs;
use std::path::PathBuf;

pub struct CsvScriptAdapter {
    path: PathBuf,
}

impl CsvScriptAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl InstructionSource for CsvScriptAdapter {
    fn load_instructions(&self) -> Result<Vec<Instruction>, PapertraderError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            PapertraderError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read {}: {}", self.path.display(), e),
            ))
        })?;
        let instructions = parse_script(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            count = instructions.len(),
            "script loaded"
        );
        Ok(instructions)
    }
}

pub fn parse_script(content: &str) -> Result<Vec<Instruction>, PapertraderError> {
    // Comments are skipped here rather than by the reader so that record
    // positions stay physical line numbers.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut instructions = Vec::new();
    let mut header_seen = false;

    for result in rdr.records() {
        let record = result.map_err(|e| PapertraderError::ScriptParse {
            line: e.position().map(|p| p.line() as usize).unwrap_or(0),
            reason: format!("CSV parse error: {}", e),
        })?;
        if record.get(0).is_some_and(|v| v.starts_with('#')) {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let field = |idx: usize| record.get(idx).filter(|v| !v.is_empty());
        let parse_err = |reason: String| PapertraderError::ScriptParse { line, reason };

        let action = field(0).ok_or_else(|| parse_err("missing action".into()))?;
        let instruction = match action.to_lowercase().as_str() {
            "deposit" | "withdraw" => {
                let raw = field(1).ok_or_else(|| parse_err("missing amount".into()))?;
                let amount: f64 = raw
                    .parse()
                    .map_err(|_| parse_err(format!("invalid amount '{raw}'")))?;
                if action.eq_ignore_ascii_case("deposit") {
                    Instruction::Deposit { amount }
                } else {
                    Instruction::Withdraw { amount }
                }
            }
            "buy" | "sell" => {
                let symbol = field(2)
                    .ok_or_else(|| parse_err("missing symbol".into()))?
                    .to_uppercase();
                let raw = field(3).ok_or_else(|| parse_err("missing quantity".into()))?;
                let quantity: i64 = raw
                    .parse()
                    .map_err(|_| parse_err(format!("invalid quantity '{raw}'")))?;
                if action.eq_ignore_ascii_case("buy") {
                    Instruction::Buy { symbol, quantity }
                } else {
                    Instruction::Sell { symbol, quantity }
                }
            }
            other => return Err(parse_err(format!("unknown action '{other}'"))),
        };
        instructions.push(instruction);
    }

    Ok(instructions)
}
