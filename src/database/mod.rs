//! SQLite request store for the period reports.
//!
//! ## Architecture
//!
//! The `Database` struct directly implements all operation traits:
//! - `RequestOperations` - Loading users and requests
//! - `ReportQueries` - Range counts, monthly counts and manager rankings
//! - `StatisticsOperations` - Store statistics
//!
//! It also implements the period aggregator's `BoundaryCountSource` and
//! `PeriodCountSource` for `RequestFilter` keys.

pub mod query_helper;
mod reports;
mod requests;
pub mod schema;
pub mod statistics;
pub mod traits;

pub use query_helper::QueryHelper;
pub use schema::setup_schema;
pub use statistics::DatabaseStats;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

/// The main database interface that implements all operation traits.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) the store at `database_path` and initialise the schema
    ///
    /// `":memory:"` opens a private in-memory store.
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
