use chrono::NaiveDate;
use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV processing
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid CSV record during import
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// Period aggregation failures
    #[error("Period report error: {0}")]
    Period(#[from] PeriodError),
}

/// Period aggregation error types
#[derive(Error, Debug)]
pub enum PeriodError {
    /// Requested range is empty or reversed
    #[error("Invalid range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Date has no following calendar month to bucket against
    #[error("Date {date} is too close to the end of the supported calendar")]
    OutOfCalendar { date: NaiveDate },

    /// A count source failed; no series is produced
    #[error("Data source failed during {operation}: {source}")]
    DataSource {
        operation: String,
        #[source]
        source: Box<AppError>,
    },

    /// Aggregation was cancelled at a data-source boundary
    #[error("Aggregation cancelled before {operation}")]
    Cancelled { operation: String },
}

impl PeriodError {
    pub fn data_source(operation: impl Into<String>, source: AppError) -> Self {
        PeriodError::DataSource {
            operation: operation.into(),
            source: Box::new(source),
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for period aggregation
pub type PeriodResult<T> = Result<T, PeriodError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
