//! Period report analysis
//!
//! The `ReportEngine` is the main API for the request reports:
//!
//! - **Requests by period** - Gap-free monthly counts for one progress status
//! - **Manager statistics** - The same series restricted to one assignee
//! - **Best managers** - Assignees ranked by matching requests in a range
//!
//! Period series are produced by [`PeriodBucketAggregator`], with the
//! request store acting as both of its count sources.
//!
//! ## Usage
//!
//! ```rust
//! use overseer_reports::analysis::ReportEngine;
//! use overseer_reports::errors::AppResult;
//! use overseer_reports::types::{DateRange, ProgressStatus};
//! use chrono::NaiveDate;
//!
//! fn example() -> AppResult<()> {
//!     let engine = ReportEngine::new(":memory:")?;
//!     let range = DateRange::new(
//!         NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
//!     )?;
//!     let report = engine.requests_by_period(&range, ProgressStatus::Closed)?;
//!     assert_eq!(report.buckets.len(), 4);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod best_managers;
pub mod period_aggregator;
pub mod reports;

pub use best_managers::BestManagersAnalyser;
pub use period_aggregator::{
    BoundaryCountSource, CancellationToken, PeriodBucketAggregator, PeriodCountSource,
};
pub use reports::{OutputFormat, ReportFormatter};

use crate::database::{Database, RequestOperations};
use crate::errors::{AppError, AppResult};
use crate::types::{BestManagersReport, DateRange, PeriodReport, ProgressStatus, RequestFilter};
use tracing::info;

/// Main report engine
pub struct ReportEngine {
    database: Database,
    cancellation: Option<CancellationToken>,
}

impl ReportEngine {
    /// Create a new report engine over the store at `database_path`
    pub fn new(database_path: &str) -> AppResult<Self> {
        let database = Database::new(database_path)?;
        Ok(Self::from_database(database))
    }

    /// Wrap an already opened store
    pub fn from_database(database: Database) -> Self {
        Self {
            database,
            cancellation: None,
        }
    }

    /// Abort period aggregations once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Gap-free monthly counts of requests in `status` over `range`
    pub fn requests_by_period(
        &self,
        range: &DateRange,
        status: ProgressStatus,
    ) -> AppResult<PeriodReport> {
        let filter = RequestFilter::ByStatus { status };
        self.period_report("Requests by period", range, filter)
    }

    /// Gap-free monthly counts of one manager's requests in `status` over `range`
    pub fn manager_statistics(
        &self,
        range: &DateRange,
        status: ProgressStatus,
        manager_id: i64,
    ) -> AppResult<PeriodReport> {
        let manager = self
            .database
            .get_user(manager_id)?
            .ok_or_else(|| AppError::InvalidData(format!("Unknown manager id: {}", manager_id)))?;

        let filter = RequestFilter::ByManager { status, manager_id };
        let report = self.period_report("Manager statistics", range, filter)?;
        Ok(report.with_manager_name(format!("{} {}", manager.first_name, manager.last_name)))
    }

    /// Managers ranked by requests in `status` over `range`
    pub fn best_managers(
        &self,
        range: &DateRange,
        status: ProgressStatus,
        limit: usize,
    ) -> AppResult<BestManagersReport> {
        BestManagersAnalyser::analyse(&self.database, range, status, limit)
    }

    fn period_report(
        &self,
        title: &str,
        range: &DateRange,
        filter: RequestFilter,
    ) -> AppResult<PeriodReport> {
        let mut aggregator = PeriodBucketAggregator::new(&self.database, &self.database);
        if let Some(token) = &self.cancellation {
            aggregator = aggregator.with_cancellation(token.clone());
        }

        let buckets = aggregator.aggregate(range, &filter)?;
        let report = PeriodReport::new(title, *range, filter, buckets);

        info!(
            "{} {}..{} [{}]: {} bucket(s), {} request(s), {} empty month(s)",
            title,
            range.start(),
            range.end(),
            filter,
            report.buckets.len(),
            report.total,
            report.empty_months
        );
        Ok(report)
    }
}
