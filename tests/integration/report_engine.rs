//! Report engine end to end: seeded store through formatted output

use crate::common::db_seeding::{at, date, request, seed_users};
use crate::common::TestDatabase;
use overseer_reports::analysis::{CancellationToken, OutputFormat, ReportEngine, ReportFormatter};
use overseer_reports::database::{Database, RequestOperations};
use overseer_reports::errors::{AppError, PeriodError};
use overseer_reports::types::{DateRange, ProgressStatus};

fn seeded_engine(test_db: &TestDatabase) -> ReportEngine {
    let mut db = Database::new(&test_db.path_string()).unwrap();
    seed_users(&mut db);
    db.insert_requests_batch(&[
        request(1, Some(1), ProgressStatus::Closed, at(2024, 1, 20, 9)),
        request(2, Some(2), ProgressStatus::Closed, at(2024, 1, 25, 9)),
        request(3, Some(1), ProgressStatus::Closed, at(2024, 2, 3, 9)),
        request(4, Some(1), ProgressStatus::Closed, at(2024, 2, 17, 9)),
        request(5, Some(2), ProgressStatus::Closed, at(2024, 2, 28, 9)),
        request(6, Some(1), ProgressStatus::Free, at(2024, 3, 4, 9)),
        request(7, None, ProgressStatus::Closed, at(2024, 4, 2, 9)),
        request(8, Some(2), ProgressStatus::Closed, at(2024, 4, 5, 9)),
    ])
    .unwrap();
    ReportEngine::from_database(db)
}

fn range() -> DateRange {
    DateRange::new(date(2024, 1, 15), date(2024, 4, 10)).unwrap()
}

#[test]
fn test_requests_by_period_end_to_end() {
    let test_db = TestDatabase::new("engine_period").unwrap();
    let engine = seeded_engine(&test_db);

    let report = engine
        .requests_by_period(&range(), ProgressStatus::Closed)
        .unwrap();
    let counts: Vec<u64> = report.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![2, 3, 0, 2]);
    assert_eq!(report.total, 7);
    assert!(report.manager_name.is_none());

    let json = ReportFormatter::format_period_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["buckets"].as_array().unwrap().len(), 4);
    assert_eq!(value["buckets"][2]["label"], "2024-03");
    assert_eq!(value["buckets"][2]["count"], 0);
}

#[test]
fn test_manager_statistics_end_to_end() {
    let test_db = TestDatabase::new("engine_manager").unwrap();
    let engine = seeded_engine(&test_db);

    let report = engine
        .manager_statistics(&range(), ProgressStatus::Closed, 1)
        .unwrap();
    let counts: Vec<u64> = report.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 2, 0, 0]);
    assert_eq!(report.manager_name.as_deref(), Some("Olena Koval"));

    let console =
        ReportFormatter::format_period_report(&report, &OutputFormat::Console).unwrap();
    assert!(console.contains("Manager: Olena Koval"));
    assert!(console.contains("manager #1"));
}

#[test]
fn test_manager_statistics_unknown_manager() {
    let test_db = TestDatabase::new("engine_unknown_manager").unwrap();
    let engine = seeded_engine(&test_db);

    assert!(matches!(
        engine.manager_statistics(&range(), ProgressStatus::Closed, 404),
        Err(AppError::InvalidData(_))
    ));
}

#[test]
fn test_best_managers_end_to_end() {
    let test_db = TestDatabase::new("engine_best").unwrap();
    let engine = seeded_engine(&test_db);

    let report = engine
        .best_managers(&range(), ProgressStatus::Closed, 10)
        .unwrap();
    assert_eq!(report.total_assigned, 6);
    assert_eq!(report.managers.len(), 2);
    // Equal counts fall back to last name
    assert_eq!(report.managers[0].display_name(), "Taras Bondar");
    assert_eq!(report.managers[1].display_name(), "Olena Koval");
    assert_eq!(report.managers[0].count, 3);
    assert_eq!(report.managers[1].count, 3);
    assert_eq!(report.managers[0].percentage, 50.0);

    let limited = engine
        .best_managers(&range(), ProgressStatus::Closed, 1)
        .unwrap();
    assert_eq!(limited.managers.len(), 1);
}

#[test]
fn test_cancelled_engine_fails_without_partial_series() {
    let test_db = TestDatabase::new("engine_cancelled").unwrap();
    let token = CancellationToken::new();
    let engine = seeded_engine(&test_db).with_cancellation(token.clone());

    assert!(engine
        .requests_by_period(&range(), ProgressStatus::Closed)
        .is_ok());

    token.cancel();
    assert!(matches!(
        engine.requests_by_period(&range(), ProgressStatus::Closed),
        Err(AppError::Period(PeriodError::Cancelled { .. }))
    ));
}
