//! Instruction source port.

use crate::domain::error::PapertraderError;
use crate::domain::instruction::Instruction;

/// Supplies an ordered list of instructions to replay against an account.
pub trait InstructionSource {
    fn load_instructions(&self) -> Result<Vec<Instruction>, PapertraderError>;
}
