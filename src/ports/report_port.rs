//! Statement report port.

use crate::domain::error::PapertraderError;
use crate::domain::runner::RunSummary;
use crate::domain::statement::Statement;

/// Port for writing account statements.
pub trait ReportPort {
    fn write(&self, statement: &Statement, output_path: &str) -> Result<(), PapertraderError>;

    /// Default implementation: ignores the run summary and writes the statement alone.
    fn write_run(
        &self,
        statement: &Statement,
        _summary: &RunSummary,
        output_path: &str,
    ) -> Result<(), PapertraderError> {
        self.write(statement, output_path)
    }
}
