//! Best managers by period
//!
//! Ranks assignees by the number of requests in a given progress status
//! created inside the range, with each manager's share of all assigned
//! matching requests.

use crate::database::{Database, ReportQueries};
use crate::errors::AppResult;
use crate::types::{BestManagersReport, DateRange, ProgressStatus, RequestFilter};
use crate::utils::math::{round_percentage, safe_percentage_u64};
use tracing::debug;

/// Best managers analyser
pub struct BestManagersAnalyser;

impl BestManagersAnalyser {
    /// Rank up to `limit` managers for `status` within `range`
    pub fn analyse(
        db: &Database,
        range: &DateRange,
        status: ProgressStatus,
        limit: usize,
    ) -> AppResult<BestManagersReport> {
        let total_assigned = db.count_assigned_in_range(range.start(), range.end(), status)?;
        let mut managers = db.best_managers_in_range(range.start(), range.end(), status, limit)?;

        for manager in &mut managers {
            manager.percentage =
                round_percentage(safe_percentage_u64(manager.count, total_assigned));
        }

        debug!(
            "Ranked {} manager(s) over {} assigned {} request(s)",
            managers.len(),
            total_assigned,
            status
        );

        Ok(BestManagersReport {
            range: *range,
            filter: RequestFilter::ByStatus { status },
            total_assigned,
            managers,
        })
    }
}
