//! Request store query tests over a file-backed database

use crate::common::db_seeding::{at, date, request, seed_synthetic, seed_users, MANAGER_IDS};
use crate::common::TestDatabase;
use chrono::Datelike;
use overseer_reports::database::{Database, ReportQueries, RequestOperations, StatisticsOperations};
use overseer_reports::types::{ProgressStatus, RequestFilter};
use std::collections::BTreeMap;

#[test]
fn test_monthly_counts_match_naive_grouping() {
    let mut test_db = TestDatabase::new("monthly_counts").unwrap();
    let requests = seed_synthetic(test_db.database_mut(), 1000, 5);
    let db = test_db.database();
    let filter = RequestFilter::ByStatus {
        status: ProgressStatus::Joined,
    };

    let (start, end) = (date(2022, 6, 1), date(2024, 6, 1));
    let sparse = db.monthly_request_counts(start, end, &filter).unwrap();

    let mut expected: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for r in &requests {
        let day = r.created_at.date();
        if start <= day && day < end && r.matches(&filter) {
            *expected.entry((day.year(), day.month())).or_default() += 1;
        }
    }

    let actual: BTreeMap<(i32, u32), u64> = sparse
        .iter()
        .map(|c| ((c.year, c.month), c.count))
        .collect();
    assert_eq!(actual, expected);
    assert!(sparse.iter().all(|c| c.count > 0));
}

#[test]
fn test_best_managers_ties_break_on_name() {
    let mut test_db = TestDatabase::new("best_managers_ties").unwrap();
    let db = test_db.database_mut();
    seed_users(db);

    // Bondar and Koval both get two, Shevchuk one
    db.insert_requests_batch(&[
        request(1, Some(1), ProgressStatus::Closed, at(2024, 3, 2, 9)),
        request(2, Some(1), ProgressStatus::Closed, at(2024, 3, 5, 9)),
        request(3, Some(2), ProgressStatus::Closed, at(2024, 3, 7, 9)),
        request(4, Some(2), ProgressStatus::Closed, at(2024, 3, 9, 9)),
        request(5, Some(3), ProgressStatus::Closed, at(2024, 3, 11, 9)),
        request(6, None, ProgressStatus::Closed, at(2024, 3, 12, 9)),
        request(7, Some(3), ProgressStatus::Free, at(2024, 3, 12, 9)),
    ])
    .unwrap();

    let ranking = db
        .best_managers_in_range(date(2024, 3, 1), date(2024, 4, 1), ProgressStatus::Closed, 10)
        .unwrap();
    let names: Vec<&str> = ranking.iter().map(|m| m.last_name.as_str()).collect();
    assert_eq!(names, vec!["Bondar", "Koval", "Shevchuk"]);
    assert_eq!(ranking[0].count, 2);
    assert_eq!(ranking[2].count, 1);

    assert_eq!(
        db.count_assigned_in_range(date(2024, 3, 1), date(2024, 4, 1), ProgressStatus::Closed)
            .unwrap(),
        5
    );
}

#[test]
fn test_reimport_replaces_existing_rows() {
    let mut test_db = TestDatabase::new("reimport").unwrap();
    let db = test_db.database_mut();
    seed_users(db);

    db.insert_requests_batch(&[request(1, Some(1), ProgressStatus::Free, at(2024, 1, 3, 9))])
        .unwrap();
    db.insert_requests_batch(&[request(1, Some(2), ProgressStatus::Closed, at(2024, 1, 3, 9))])
        .unwrap();

    let all = db.get_all_requests().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].assignee_id, Some(2));
    assert_eq!(all[0].progress_status, ProgressStatus::Closed);
}

#[test]
fn test_store_persists_across_reopen() {
    let mut test_db = TestDatabase::new("reopen").unwrap();
    let requests = seed_synthetic(test_db.database_mut(), 120, 9);

    let reopened = Database::new(&test_db.path_string()).unwrap();
    let stats = reopened.get_database_stats().unwrap();
    assert_eq!(stats.total_requests, requests.len() as u64);
    assert_eq!(stats.total_users, MANAGER_IDS.len() as u64 + 1);

    let breakdown_total: u64 = stats.status_breakdown.iter().map(|(_, n)| n).sum();
    assert_eq!(breakdown_total, stats.total_requests);
}
