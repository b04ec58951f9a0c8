//! Best managers report formatter

use super::utils::{export_json, format_number};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::BestManagersReport;

/// Format the best managers ranking
pub fn format_best_managers(
    report: &BestManagersReport,
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str("\n🏆 Best Managers by Period\n");
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
            output.push_str(&format!(
                "Range: {} .. {} (end exclusive)\n",
                report.range.start(),
                report.range.end()
            ));
            output.push_str(&format!("Filter: {}\n", report.filter));
            output.push_str(&format!(
                "Assigned Requests: {}\n\n",
                format_number(report.total_assigned)
            ));

            if report.managers.is_empty() {
                output.push_str("No assigned requests found.\n");
                return Ok(output);
            }

            output.push_str(&format!(
                "  {:>4} {:<28} {:>10} {:>8}\n",
                "#", "Manager", "Requests", "Share"
            ));
            output.push_str(&format!("  {:->4} {:-<28} {:->10} {:->8}\n", "", "", "", ""));

            for (position, manager) in report.managers.iter().enumerate() {
                output.push_str(&format!(
                    "  {:>4} {:<28} {:>10} {:>7.2}%\n",
                    position + 1,
                    manager.display_name(),
                    format_number(manager.count),
                    manager.percentage
                ));
            }

            Ok(output)
        }
    }
}
