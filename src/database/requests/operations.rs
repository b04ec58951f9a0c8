//! Request and user loading operations.
//!
//! Both batch inserts run inside a single transaction so a failing row
//! leaves the store unchanged.

use crate::database::traits::RequestOperations;
use crate::database::{Database, QueryHelper};
use crate::errors::AppResult;
use crate::types::{Request, User};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

impl RequestOperations for Database {
    fn insert_users_batch(&mut self, users: &[User]) -> AppResult<usize> {
        let inserted = self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT OR REPLACE INTO users (id, first_name, last_name, role)
                   VALUES (?1, ?2, ?3, ?4)"#,
            )?;

            let mut count = 0;
            for user in users {
                count += stmt.execute(params![
                    user.id,
                    user.first_name,
                    user.last_name,
                    user.role
                ])?;
            }
            Ok(count)
        })?;

        debug!("Inserted {} users", inserted);
        Ok(inserted)
    }

    fn insert_requests_batch(&mut self, requests: &[Request]) -> AppResult<usize> {
        let inserted = self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT OR REPLACE INTO requests
                   (id, title, reporter_id, assignee_id, progress_status, created_at)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            )?;

            let mut count = 0;
            for request in requests {
                count += stmt.execute(params![
                    request.id,
                    request.title,
                    request.reporter_id,
                    request.assignee_id,
                    request.progress_status.as_str(),
                    request.created_at
                ])?;
            }
            Ok(count)
        })?;

        debug!("Inserted {} requests", inserted);
        Ok(inserted)
    }

    fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        let user = self
            .connection()
            .query_row(
                "SELECT id, first_name, last_name, role FROM users WHERE id = ?1",
                [id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        role: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn get_all_requests(&self) -> AppResult<Vec<Request>> {
        let rows: Vec<(i64, String, i64, Option<i64>, String, chrono::NaiveDateTime)> =
            self.connection().query_collect(
                r#"SELECT id, title, reporter_id, assignee_id, progress_status, created_at
                   FROM requests ORDER BY id"#,
                [],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )?;

        rows.into_iter()
            .map(
                |(id, title, reporter_id, assignee_id, status, created_at)| -> AppResult<Request> {
                    Ok(Request {
                        id,
                        title,
                        reporter_id,
                        assignee_id,
                        progress_status: status.parse()?,
                        created_at,
                    })
                },
            )
            .collect()
    }
}
