use crate::errors::AppResult;
use crate::types::ProgressStatus;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

const DEFAULT_DATABASE_PATH: &str = "./overseer.db";
const DEFAULT_STATUS: &str = "Closed";
const DEFAULT_BEST_MANAGERS_LIMIT: usize = 10;
const DEFAULT_BATCH_SIZE: usize = 1000;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub reports: ReportsConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Progress status used when a report command omits `--status`
    pub default_status: String,
    pub best_managers_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub batch_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                default_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            },
            reports: ReportsConfig {
                default_status: DEFAULT_STATUS.to_string(),
                best_managers_limit: DEFAULT_BEST_MANAGERS_LIMIT,
            },
            import: ImportConfig {
                batch_size: DEFAULT_BATCH_SIZE,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("database.default_path", DEFAULT_DATABASE_PATH)?
            .set_default("reports.default_status", DEFAULT_STATUS)?
            .set_default(
                "reports.best_managers_limit",
                DEFAULT_BEST_MANAGERS_LIMIT as i64,
            )?
            .set_default("import.batch_size", DEFAULT_BATCH_SIZE as i64)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // OVERSEER_REPORTS__DEFAULT_STATUS etc. override file settings
            .add_source(
                config::Environment::with_prefix("OVERSEER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(db_path) = env::var("OVERSEER_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        if app_config.import.batch_size == 0 {
            return Err(ConfigError::Message(
                "import.batch_size must be greater than zero".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        // Fall back to built-in defaults if the config can't be loaded
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Configured default status, parsed
    pub fn default_status(&self) -> AppResult<ProgressStatus> {
        self.reports.default_status.parse()
    }
}
