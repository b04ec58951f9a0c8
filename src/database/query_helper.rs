//! Query helper utilities for common database patterns
//!
//! Consolidates the repeated query shapes used by the report queries:
//! - Single COUNT(*) results with bound parameters
//! - Optional single-value aggregates (MIN/MAX that are NULL on empty tables)
//! - Query collection with mapping

use crate::errors::AppResult;
use rusqlite::types::FromSql;
use rusqlite::{Connection, OptionalExtension, Params, Row};

/// Helper trait for common database query patterns
///
/// ## Usage Examples
///
/// ```ignore
/// use crate::database::QueryHelper;
///
/// let total = conn.count_rows("requests", None)?;
/// let closed = conn.count_query(
///     "SELECT COUNT(*) FROM requests WHERE progress_status = ?1",
///     ["Closed"],
/// )?;
/// let earliest: Option<String> = conn.optional_aggregate("SELECT MIN(created_at) FROM requests")?;
/// ```
pub trait QueryHelper {
    /// Query a COUNT(*) result for any table
    fn count_rows(&self, table: &str, where_clause: Option<&str>) -> AppResult<u64>;

    /// Run a parameterised COUNT query returning a single non-negative integer
    fn count_query<P: Params>(&self, sql: &str, params: P) -> AppResult<u64>;

    /// Execute an aggregate returning one nullable value
    fn optional_aggregate<T: FromSql>(&self, sql: &str) -> AppResult<Option<T>>;

    /// Execute a parameterised query returning multiple rows, collecting into Vec
    fn query_collect<T, P, F>(&self, sql: &str, params: P, mapper: F) -> AppResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row) -> rusqlite::Result<T>;
}

impl QueryHelper for Connection {
    fn count_rows(&self, table: &str, where_clause: Option<&str>) -> AppResult<u64> {
        let sql = if let Some(where_part) = where_clause {
            format!("SELECT COUNT(*) FROM {} WHERE {}", table, where_part)
        } else {
            format!("SELECT COUNT(*) FROM {}", table)
        };

        self.count_query(&sql, [])
    }

    fn count_query<P: Params>(&self, sql: &str, params: P) -> AppResult<u64> {
        let count: i64 = self.query_row(sql, params, |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn optional_aggregate<T: FromSql>(&self, sql: &str) -> AppResult<Option<T>> {
        let value: Option<Option<T>> = self.query_row(sql, [], |row| row.get(0)).optional()?;
        Ok(value.flatten())
    }

    fn query_collect<T, P, F>(&self, sql: &str, params: P, mut mapper: F) -> AppResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        let mut stmt = self.prepare(sql)?;
        let results = stmt
            .query_map(params, &mut mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(results)
    }
}
