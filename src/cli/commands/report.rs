use crate::analysis::{OutputFormat, ReportEngine, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::types::{DateRange, ProgressStatus};
use crate::utils::time::parse_iso_date;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

// ===== Helper Functions =====

/// Parse a `YYYY-MM-DD` CLI argument
fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).ok_or_else(|| format!("expected YYYY-MM-DD, got '{}'", value))
}

/// Parse output format string to OutputFormat enum
fn parse_format(format_str: &str) -> OutputFormat {
    match format_str.to_lowercase().as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Console,
    }
}

/// Write output to file with safe directory creation
fn write_output_to_file(path: &Path, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}

/// Arguments shared by every report
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Range start, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub start: NaiveDate,

    /// Range end, exclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub end: NaiveDate,

    /// Progress status to count (overrides reports.default_status)
    #[arg(long)]
    pub status: Option<String>,

    /// Database path (overrides config.toml)
    #[arg(long)]
    pub database_path: Option<PathBuf>,

    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    fn range(&self) -> AppResult<DateRange> {
        Ok(DateRange::new(self.start, self.end)?)
    }

    fn status(&self, app_config: &AppConfig) -> AppResult<ProgressStatus> {
        match &self.status {
            Some(status) => status.parse(),
            None => app_config.default_status(),
        }
    }

    fn database_path(&self, app_config: &AppConfig) -> String {
        self.database_path
            .clone()
            .unwrap_or(app_config.database.default_path.clone())
            .to_string_lossy()
            .to_string()
    }
}

/// Run a report and print or write its formatted output
fn run_report<T, F, G>(
    args: &ReportArgs,
    description: &str,
    app_config: &AppConfig,
    report_fn: F,
    format_fn: G,
) -> AppResult<()>
where
    F: FnOnce(&ReportEngine, &DateRange, ProgressStatus) -> AppResult<T>,
    G: FnOnce(&T, &OutputFormat) -> AppResult<String>,
{
    let range = args.range()?;
    let status = args.status(app_config)?;
    let engine = ReportEngine::new(&args.database_path(app_config))?;
    let report = report_fn(&engine, &range, status)?;
    let output = format_fn(&report, &parse_format(&args.format))?;

    match &args.output {
        Some(path) => write_output_to_file(path, &output, description),
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}

// ===== Command Definitions =====

/// Report commands over the request store
#[derive(Args)]
pub struct ReportCommand {
    #[command(subcommand)]
    pub report_type: ReportCommands,
}

impl ReportCommand {
    pub fn run(&self) -> AppResult<()> {
        run_report_command(&self.report_type)
    }
}

/// Report command types
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly request counts for one status, with no gaps
    RequestsByPeriod {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Monthly request counts for one manager, with no gaps
    ManagerStats {
        #[command(flatten)]
        args: ReportArgs,

        /// Id of the assignee to report on
        #[arg(long)]
        manager_id: i64,
    },

    /// Managers ranked by requests in the range
    BestManagers {
        #[command(flatten)]
        args: ReportArgs,

        /// Maximum managers to list (overrides reports.best_managers_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run_report_command(report_type: &ReportCommands) -> AppResult<()> {
    // Built-in defaults stand in for a missing or broken config
    let app_config = AppConfig::get_defaults()?;

    match report_type {
        ReportCommands::RequestsByPeriod { args } => run_report(
            args,
            "Requests by period report",
            &app_config,
            |e, range, status| e.requests_by_period(range, status),
            ReportFormatter::format_period_report,
        ),

        ReportCommands::ManagerStats { args, manager_id } => run_report(
            args,
            "Manager statistics report",
            &app_config,
            |e, range, status| e.manager_statistics(range, status, *manager_id),
            ReportFormatter::format_period_report,
        ),

        ReportCommands::BestManagers { args, limit } => {
            let limit = limit.unwrap_or(app_config.reports.best_managers_limit);
            run_report(
                args,
                "Best managers report",
                &app_config,
                |e, range, status| e.best_managers(range, status, limit),
                ReportFormatter::format_best_managers,
            )
        }
    }
}
