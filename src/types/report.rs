//! Report result types handed to the formatting layer

use super::period::{BucketSeries, DateRange};
use super::request::RequestFilter;
use serde::Serialize;

/// Gap-free monthly request counts for one filter
#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    /// Human-readable title (e.g., "Requests by period")
    pub title: String,

    /// Requested half-open range
    pub range: DateRange,

    /// Filter the counts were taken under
    pub filter: RequestFilter,

    /// Manager display name for per-manager reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,

    /// Total matching requests across all buckets
    pub total: u64,

    /// Full months with no matching request
    pub empty_months: usize,

    /// Ordered, contiguous buckets
    pub buckets: BucketSeries,
}

impl PeriodReport {
    pub fn new(
        title: impl Into<String>,
        range: DateRange,
        filter: RequestFilter,
        buckets: BucketSeries,
    ) -> Self {
        Self {
            title: title.into(),
            range,
            filter,
            manager_name: None,
            total: buckets.total(),
            empty_months: buckets.empty_months(),
            buckets,
        }
    }

    pub fn with_manager_name(mut self, name: impl Into<String>) -> Self {
        self.manager_name = Some(name.into());
        self
    }
}

/// One manager's position in the best-managers ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerRanking {
    pub manager_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub count: u64,
    /// Share of all matching assigned requests in the range
    pub percentage: f64,
}

impl ManagerRanking {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Managers ranked by number of matching requests in a range
#[derive(Debug, Clone, Serialize)]
pub struct BestManagersReport {
    pub range: DateRange,
    pub filter: RequestFilter,
    /// Matching requests with an assignee, across all managers
    pub total_assigned: u64,
    pub managers: Vec<ManagerRanking>,
}
