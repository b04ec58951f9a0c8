//! Report formatting and output generation
//!
//! Provides formatting for report results via the [`ReportFormatter`] facade.
//! Supports Console and JSON output formats.

pub mod managers;
pub mod period;
pub mod utils;

use crate::errors::AppResult;
use crate::types::{BestManagersReport, PeriodReport};

/// Output format options for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_number(n: u64) -> String {
        utils::format_number(n)
    }

    pub fn format_period_report(r: &PeriodReport, f: &OutputFormat) -> AppResult<String> {
        period::format_period_report(r, f)
    }

    pub fn format_best_managers(r: &BestManagersReport, f: &OutputFormat) -> AppResult<String> {
        managers::format_best_managers(r, f)
    }
}
