use crate::database::traits::{RequestOperations, StatisticsOperations};
use crate::database::{Database, DatabaseStats};
use crate::errors::{AppError, AppResult};
use crate::types::{ProgressStatus, Request, User};
use crate::utils::time::parse_iso_datetime;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Import statistics
#[derive(Debug, Clone)]
pub struct ImportStats {
    pub users_imported: usize,
    pub requests_imported: usize,
    pub batches_processed: usize,
    pub duration: Duration,
}

impl ImportStats {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} user(s) and {} request(s) in {} batch(es) ({:.2}s)",
            self.users_imported,
            self.requests_imported,
            self.batches_processed,
            self.duration.as_secs_f64()
        )
    }
}

#[derive(Debug, Deserialize)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    role: String,
}

#[derive(Debug, Deserialize)]
struct RequestRow {
    id: i64,
    title: String,
    reporter_id: i64,
    assignee_id: Option<i64>,
    progress_status: String,
    created_at: String,
}

impl RequestRow {
    fn into_request(self) -> Result<Request, String> {
        let progress_status = self
            .progress_status
            .parse::<ProgressStatus>()
            .map_err(|e| e.to_string())?;
        let created_at = parse_iso_datetime(&self.created_at)
            .ok_or_else(|| format!("Invalid created_at timestamp: {}", self.created_at))?;

        Ok(Request {
            id: self.id,
            title: self.title,
            reporter_id: self.reporter_id,
            assignee_id: self.assignee_id,
            progress_status,
            created_at,
        })
    }
}

/// CSV importer for users and requests
pub struct CsvImporter {
    database: Database,
    batch_size: usize,
}

impl CsvImporter {
    /// Create a new importer writing into the store at `database_path`
    pub fn new(database_path: &str, batch_size: usize) -> AppResult<Self> {
        let database = Database::new(database_path)?;
        Ok(Self::from_database(database, batch_size))
    }

    pub fn from_database(database: Database, batch_size: usize) -> Self {
        info!("CSV Importer initialised (batch size: {})", batch_size.max(1));
        Self {
            database,
            batch_size: batch_size.max(1),
        }
    }

    /// Import users then requests
    ///
    /// Users go first so that reporter and assignee references resolve.
    pub fn import(&mut self, users_csv: &Path, requests_csv: &Path) -> AppResult<ImportStats> {
        let started = Instant::now();
        info!("Starting CSV import");
        info!("Users CSV: {}", users_csv.display());
        info!("Requests CSV: {}", requests_csv.display());

        let (users_imported, user_batches) = self.import_users(open_csv(users_csv)?)?;
        let (requests_imported, request_batches) = self.import_requests(open_csv(requests_csv)?)?;

        let stats = ImportStats {
            users_imported,
            requests_imported,
            batches_processed: user_batches + request_batches,
            duration: started.elapsed(),
        };
        info!("{}", stats.summary());
        Ok(stats)
    }

    /// Import users from any reader, returning (rows imported, batches written)
    pub fn import_users<R: Read>(&mut self, reader: R) -> AppResult<(usize, usize)> {
        let mut batch = Vec::with_capacity(self.batch_size);
        let mut imported = 0;
        let mut batches = 0;

        for_each_row(reader, |line, row: UserRow| {
            batch.push(User {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
                role: row.role,
            });
            if batch.len() >= self.batch_size {
                imported += self.database.insert_users_batch(&batch)?;
                batches += 1;
                debug!("Wrote user batch {} ending at line {}", batches, line);
                batch.clear();
            }
            Ok(())
        })?;

        if !batch.is_empty() {
            imported += self.database.insert_users_batch(&batch)?;
            batches += 1;
        }

        info!("Imported {} user(s)", imported);
        Ok((imported, batches))
    }

    /// Import requests from any reader, returning (rows imported, batches written)
    pub fn import_requests<R: Read>(&mut self, reader: R) -> AppResult<(usize, usize)> {
        let mut batch = Vec::with_capacity(self.batch_size);
        let mut imported = 0;
        let mut batches = 0;

        for_each_row(reader, |line, row: RequestRow| {
            let request = row
                .into_request()
                .map_err(|reason| AppError::InvalidRecord { line, reason })?;
            batch.push(request);
            if batch.len() >= self.batch_size {
                imported += self.database.insert_requests_batch(&batch)?;
                batches += 1;
                debug!("Wrote request batch {} ending at line {}", batches, line);
                batch.clear();
            }
            Ok(())
        })?;

        if !batch.is_empty() {
            imported += self.database.insert_requests_batch(&batch)?;
            batches += 1;
        }

        info!("Imported {} request(s)", imported);
        Ok((imported, batches))
    }

    /// Get database statistics
    pub fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        self.database.get_database_stats()
    }

    pub fn into_database(self) -> Database {
        self.database
    }
}

fn open_csv(path: &Path) -> AppResult<BufReader<File>> {
    let file = File::open(path).map_err(AppError::Io)?;
    Ok(BufReader::new(file))
}

/// Deserialise every data row, handing the 1-based file line to `handle`
fn for_each_row<R, T, F>(reader: R, mut handle: F) -> AppResult<()>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
    F: FnMut(usize, T) -> AppResult<()>,
{
    let mut csv_reader = ReaderBuilder::new()
        .comment(Some(b'#')) // Skip lines starting with #
        .has_headers(true) // First non-comment line is the header
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(AppError::Csv)?.clone();
    let mut record = StringRecord::new();

    while csv_reader.read_record(&mut record).map_err(AppError::Csv)? {
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();
        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| AppError::InvalidRecord {
                line,
                reason: e.to_string(),
            })?;
        handle(line, row)?;
    }

    Ok(())
}
