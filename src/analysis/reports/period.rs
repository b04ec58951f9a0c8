//! Period report formatter

use super::utils::{bar, export_json, format_number};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::{BucketKind, PeriodReport};

const BAR_WIDTH: usize = 30;

/// Format a gap-free period report
///
/// Console output lists every bucket in order, marking partial edge
/// periods, with a proportional bar per bucket.
pub fn format_period_report(report: &PeriodReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str(&format!("\n📊 {}\n", report.title));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            output.push_str(&format!(
                "Range: {} .. {} (end exclusive)\n",
                report.range.start(),
                report.range.end()
            ));
            output.push_str(&format!("Filter: {}\n", report.filter));
            if let Some(name) = &report.manager_name {
                output.push_str(&format!("Manager: {}\n", name));
            }
            output.push_str(&format!(
                "Total Requests: {}\n",
                format_number(report.total)
            ));
            output.push_str(&format!(
                "Buckets: {} ({} empty month(s))\n\n",
                report.buckets.len(),
                report.empty_months
            ));

            let max = report.buckets.iter().map(|b| b.count).max().unwrap_or(0);

            output.push_str(&format!(
                "  {:<24} {:>10}  {}\n",
                "Period", "Requests", "Distribution"
            ));
            output.push_str(&format!("  {:-<24} {:->10}  {:-<30}\n", "", "", ""));

            for bucket in &report.buckets {
                let period = match bucket.kind {
                    BucketKind::FullMonth => bucket.start_date.format("%Y-%m").to_string(),
                    BucketKind::LeadingEdge | BucketKind::TrailingEdge => {
                        format!("{} .. {}*", bucket.start_date, bucket.end_date)
                    }
                };
                output.push_str(&format!(
                    "  {:<24} {:>10}  {}\n",
                    period,
                    format_number(bucket.count),
                    bar(bucket.count, max, BAR_WIDTH)
                ));
            }
            output.push('\n');

            output.push_str("Note: * marks a partial month at the edge of the range.\n");
            output.push_str("      For machine-readable output, use --format json\n");

            Ok(output)
        }
    }
}
