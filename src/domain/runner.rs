//! Replays an instruction list against an account.

use super::account::Account;
use super::error::AccountError;
use super::instruction::Instruction;
use crate::ports::price_oracle::PriceOracle;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Rejected(AccountError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub instruction: Instruction,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub steps: Vec<StepResult>,
    /// Set when the run halted at a rejection with instructions left unapplied.
    pub stopped_early: bool,
}

impl RunSummary {
    pub fn applied_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.outcome == Outcome::Applied)
            .count()
    }

    pub fn rejected(&self) -> impl Iterator<Item = (&Instruction, &AccountError)> {
        self.steps.iter().filter_map(|s| match &s.outcome {
            Outcome::Rejected(err) => Some((&s.instruction, err)),
            Outcome::Applied => None,
        })
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected().count()
    }
}

/// Apply `instructions` in order. Rejections are recorded and, unless
/// `stop_on_error` is set, the run continues with the next instruction.
pub fn run_instructions<P: PriceOracle>(
    account: &mut Account<P>,
    instructions: &[Instruction],
    stop_on_error: bool,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for (idx, instruction) in instructions.iter().enumerate() {
        let outcome = match instruction.apply(account) {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                tracing::info!(step = idx + 1, %instruction, error = %err, "instruction rejected");
                Outcome::Rejected(err)
            }
        };
        let rejected = matches!(outcome, Outcome::Rejected(_));
        summary.steps.push(StepResult {
            instruction: instruction.clone(),
            outcome,
        });

        if rejected && stop_on_error {
            summary.stopped_early = idx + 1 < instructions.len();
            break;
        }
    }

    tracing::info!(
        applied = summary.applied_count(),
        rejected = summary.rejected_count(),
        "instruction run finished"
    );
    summary
}
