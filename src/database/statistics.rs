//! Request store statistics

use crate::database::traits::StatisticsOperations;
use crate::database::{Database, QueryHelper};
use crate::errors::AppResult;
use serde::Serialize;

/// Row counts and creation-time extent of the store
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseStats {
    pub total_users: u64,
    pub total_requests: u64,
    pub assigned_requests: u64,
    pub earliest_request: Option<String>,
    pub latest_request: Option<String>,
    /// (status name, count), most frequent first
    pub status_breakdown: Vec<(String, u64)>,
}

impl StatisticsOperations for Database {
    fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = self.connection();

        let total_users = conn.count_rows("users", None)?;
        let total_requests = conn.count_rows("requests", None)?;
        let assigned_requests = conn.count_rows("requests", Some("assignee_id IS NOT NULL"))?;
        let earliest_request = conn.optional_aggregate("SELECT MIN(created_at) FROM requests")?;
        let latest_request = conn.optional_aggregate("SELECT MAX(created_at) FROM requests")?;

        let status_breakdown = conn.query_collect(
            r#"SELECT progress_status, COUNT(*) AS request_count
               FROM requests
               GROUP BY progress_status
               ORDER BY request_count DESC, progress_status"#,
            [],
            |row| {
                let count: i64 = row.get(1)?;
                Ok((row.get::<_, String>(0)?, u64::try_from(count).unwrap_or(0)))
            },
        )?;

        Ok(DatabaseStats {
            total_users,
            total_requests,
            assigned_requests,
            earliest_request,
            latest_request,
            status_breakdown,
        })
    }
}
