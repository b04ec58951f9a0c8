//! CLI Smoke Test
//!
//! Parses real command lines and runs each report command against a seeded
//! store, writing JSON output to a file.

use crate::common::db_seeding::{at, request, seed_users};
use crate::common::TestDatabase;
use clap::Parser;
use overseer_reports::cli::commands::import::ImportCommand;
use overseer_reports::cli::commands::report::run_report_command;
use overseer_reports::cli::{Cli, Commands};
use overseer_reports::database::RequestOperations;
use overseer_reports::types::ProgressStatus;
use serial_test::serial;

fn seeded(test_name: &str) -> TestDatabase {
    let mut test_db = TestDatabase::new(test_name).unwrap();
    let db = test_db.database_mut();
    seed_users(db);
    db.insert_requests_batch(&[
        request(1, Some(1), ProgressStatus::Closed, at(2024, 1, 20, 9)),
        request(2, Some(2), ProgressStatus::Closed, at(2024, 2, 3, 9)),
        request(3, Some(2), ProgressStatus::Closed, at(2024, 4, 5, 9)),
    ])
    .unwrap();
    test_db
}

fn run(args: &[&str]) -> overseer_reports::errors::AppResult<()> {
    match Cli::try_parse_from(args).unwrap().command {
        Commands::Report(command) => run_report_command(&command.report_type),
        Commands::Import(command) => command.run(),
    }
}

#[test]
#[serial]
fn test_requests_by_period_writes_json() {
    let test_db = seeded("cli_period");
    let output = test_db.dir().join("out/period.json");
    let db_path = test_db.path_string();
    let output_path = output.to_string_lossy().to_string();

    run(&[
        "overseer-reports",
        "report",
        "requests-by-period",
        "--start",
        "2024-01-15",
        "--end",
        "2024-04-10",
        "--status",
        "Closed",
        "--database-path",
        &db_path,
        "--format",
        "json",
        "--output",
        &output_path,
    ])
    .unwrap();

    let json = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total"], 3);
    assert_eq!(value["buckets"].as_array().unwrap().len(), 4);
}

#[test]
#[serial]
fn test_manager_stats_and_best_managers_run() {
    let test_db = seeded("cli_managers");
    let db_path = test_db.path_string();

    run(&[
        "overseer-reports",
        "report",
        "manager-stats",
        "--start",
        "2024-01-01",
        "--end",
        "2024-05-01",
        "--manager-id",
        "2",
        "--database-path",
        &db_path,
    ])
    .unwrap();

    let output = test_db.dir().join("best.json");
    let output_path = output.to_string_lossy().to_string();
    run(&[
        "overseer-reports",
        "report",
        "best-managers",
        "--start",
        "2024-01-01",
        "--end",
        "2024-05-01",
        "--limit",
        "1",
        "--database-path",
        &db_path,
        "--format",
        "json",
        "--output",
        &output_path,
    ])
    .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["managers"].as_array().unwrap().len(), 1);
    assert_eq!(value["managers"][0]["last_name"], "Bondar");
}

#[test]
#[serial]
fn test_reversed_range_fails() {
    let test_db = seeded("cli_reversed");
    let db_path = test_db.path_string();

    let result = run(&[
        "overseer-reports",
        "report",
        "requests-by-period",
        "--start",
        "2024-04-10",
        "--end",
        "2024-01-15",
        "--database-path",
        &db_path,
    ]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_import_command_parses_paths() {
    let cli = Cli::try_parse_from([
        "overseer-reports",
        "import",
        "--users",
        "users.csv",
        "--requests",
        "requests.csv",
        "--batch-size",
        "50",
    ])
    .unwrap();

    match cli.command {
        Commands::Import(ImportCommand {
            users,
            requests,
            batch_size,
            database_path,
        }) => {
            assert_eq!(users.to_string_lossy(), "users.csv");
            assert_eq!(requests.to_string_lossy(), "requests.csv");
            assert_eq!(batch_size, Some(50));
            assert!(database_path.is_none());
        }
        _ => panic!("expected import command"),
    }
}
