//! Report queries - the storage side of period aggregation.
//!
//! All ranges are half-open `[start, end)` on `created_at`. Dates bind as
//! `YYYY-MM-DD` text, which orders correctly against the stored
//! `YYYY-MM-DD HH:MM:SS` timestamps.
//!
//! `Database` is both count sources the period aggregator needs:
//! - `BoundaryCountSource<RequestFilter>` via `count_requests_in_range`
//! - `PeriodCountSource<RequestFilter>` via `monthly_request_counts`

use crate::analysis::period_aggregator::{BoundaryCountSource, PeriodCountSource};
use crate::database::traits::ReportQueries;
use crate::database::{Database, QueryHelper};
use crate::errors::AppResult;
use crate::types::{ManagerRanking, ProgressStatus, RequestFilter, SparseCount};
use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

impl ReportQueries for Database {
    fn count_requests_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &RequestFilter,
    ) -> AppResult<u64> {
        let count = self.connection().count_query(
            r#"SELECT COUNT(*) FROM requests
               WHERE created_at >= ?1
                 AND created_at < ?2
                 AND progress_status = ?3
                 AND (?4 IS NULL OR assignee_id = ?4)"#,
            params![start, end, filter.status().as_str(), filter.manager_id()],
        )?;

        debug!("{}..{} [{}]: {} requests", start, end, filter, count);
        Ok(count)
    }

    fn monthly_request_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &RequestFilter,
    ) -> AppResult<Vec<SparseCount>> {
        let rows: Vec<(i32, u32, i64)> = self.connection().query_collect(
            r#"SELECT
                   CAST(strftime('%Y', created_at) AS INTEGER) AS year,
                   CAST(strftime('%m', created_at) AS INTEGER) AS month,
                   COUNT(*) AS request_count
               FROM requests
               WHERE created_at >= ?1
                 AND created_at < ?2
                 AND progress_status = ?3
                 AND (?4 IS NULL OR assignee_id = ?4)
               GROUP BY year, month"#,
            params![start, end, filter.status().as_str(), filter.manager_id()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        debug!(
            "{}..{} [{}]: {} month(s) with requests",
            start,
            end,
            filter,
            rows.len()
        );

        Ok(rows
            .into_iter()
            .map(|(year, month, count)| {
                SparseCount::new(year, month, u64::try_from(count).unwrap_or(0))
            })
            .collect())
    }

    fn best_managers_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        status: ProgressStatus,
        limit: usize,
    ) -> AppResult<Vec<ManagerRanking>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.connection().query_collect(
            r#"SELECT u.id, u.first_name, u.last_name, COUNT(*) AS request_count
               FROM requests r
               JOIN users u ON r.assignee_id = u.id
               WHERE r.created_at >= ?1
                 AND r.created_at < ?2
                 AND r.progress_status = ?3
               GROUP BY u.id, u.first_name, u.last_name
               ORDER BY request_count DESC, u.last_name, u.first_name, u.id
               LIMIT ?4"#,
            params![start, end, status.as_str(), limit],
            |row| {
                let count: i64 = row.get(3)?;
                Ok(ManagerRanking {
                    manager_id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    count: u64::try_from(count).unwrap_or(0),
                    percentage: 0.0,
                })
            },
        )
    }

    fn count_assigned_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        status: ProgressStatus,
    ) -> AppResult<u64> {
        self.connection().count_query(
            r#"SELECT COUNT(*) FROM requests
               WHERE created_at >= ?1
                 AND created_at < ?2
                 AND progress_status = ?3
                 AND assignee_id IS NOT NULL"#,
            params![start, end, status.as_str()],
        )
    }
}

impl BoundaryCountSource<RequestFilter> for Database {
    fn count_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        key: &RequestFilter,
    ) -> AppResult<u64> {
        self.count_requests_in_range(start, end, key)
    }
}

impl PeriodCountSource<RequestFilter> for Database {
    fn counts_by_month(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        key: &RequestFilter,
    ) -> AppResult<Vec<SparseCount>> {
        self.monthly_request_counts(start, end, key)
    }
}
