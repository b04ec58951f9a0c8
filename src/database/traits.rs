//! Database trait abstractions for the request store.
//!
//! Operations are grouped by concern: loading records, report queries and
//! store statistics. `Database` implements all of them.

use crate::errors::AppResult;
use crate::types::{ManagerRanking, ProgressStatus, Request, RequestFilter, SparseCount, User};
use chrono::NaiveDate;

/// Loading and looking up requests and users
pub trait RequestOperations {
    /// Insert a batch of users in one transaction (existing ids are replaced)
    fn insert_users_batch(&mut self, users: &[User]) -> AppResult<usize>;

    /// Insert a batch of requests in one transaction (existing ids are replaced)
    ///
    /// Reporters and assignees must already exist in `users`.
    fn insert_requests_batch(&mut self, requests: &[Request]) -> AppResult<usize>;

    /// Get a user by id
    fn get_user(&self, id: i64) -> AppResult<Option<User>>;

    /// Get every request, ordered by id
    fn get_all_requests(&self) -> AppResult<Vec<Request>>;
}

/// Aggregate queries backing the period reports
pub trait ReportQueries {
    /// Count requests matching `filter` created in `[start, end)`
    fn count_requests_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &RequestFilter,
    ) -> AppResult<u64>;

    /// Per-month counts of requests matching `filter` created in `[start, end)`
    ///
    /// Months without a matching request are omitted.
    fn monthly_request_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &RequestFilter,
    ) -> AppResult<Vec<SparseCount>>;

    /// Managers ranked by requests in `status` created in `[start, end)`
    ///
    /// Ordered by count descending, then last name, first name and id.
    /// `percentage` is left at 0.0 for the caller to fill in.
    fn best_managers_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        status: ProgressStatus,
        limit: usize,
    ) -> AppResult<Vec<ManagerRanking>>;

    /// Count assigned requests in `status` created in `[start, end)`
    fn count_assigned_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        status: ProgressStatus,
    ) -> AppResult<u64>;
}

/// Statistics and reporting operations
pub trait StatisticsOperations {
    /// Get basic store statistics
    fn get_database_stats(&self) -> AppResult<crate::database::DatabaseStats>;
}
