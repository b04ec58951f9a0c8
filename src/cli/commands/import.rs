use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::processor::CsvImporter;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ImportCommand {
    /// Path to users CSV (id,first_name,last_name,role)
    #[arg(long)]
    pub users: PathBuf,

    /// Path to requests CSV (id,title,reporter_id,assignee_id,progress_status,created_at)
    #[arg(long)]
    pub requests: PathBuf,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    pub database_path: Option<PathBuf>,

    /// Batch size for database inserts (overrides config.toml)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl ImportCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Overseer Reports - Import ===");

        let app_config = AppConfig::load()?;

        // CLI arguments override config values
        let database_path = self
            .database_path
            .clone()
            .unwrap_or(app_config.database.default_path.clone());
        let batch_size = self.batch_size.unwrap_or(app_config.import.batch_size);

        info!("Database: {}", database_path.display());

        let mut importer = CsvImporter::new(&database_path.to_string_lossy(), batch_size)?;
        let stats = importer.import(&self.users, &self.requests)?;
        let db_stats = importer.get_database_stats()?;

        println!("{}", stats.summary());
        println!(
            "Store now holds {} user(s) and {} request(s)",
            db_stats.total_users, db_stats.total_requests
        );
        Ok(())
    }
}
