//! Report generation port trait.

use crate::domain::analysis::Analysis;
use crate::domain::error::WeektraderError;
use std::path::Path;

/// Port for writing analysis results for a charting or presentation layer.
pub trait ReportPort {
    fn write(&self, analysis: &Analysis, output_dir: &Path) -> Result<(), WeektraderError>;
}
