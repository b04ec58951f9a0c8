//! Seeding helpers for request store tests

use chrono::{NaiveDate, NaiveDateTime};
use overseer_reports::database::{Database, RequestOperations};
use overseer_reports::types::{ProgressStatus, Request, User};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MANAGER_IDS: [i64; 3] = [1, 2, 3];
pub const REPORTER_ID: i64 = 100;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
}

pub fn user(id: i64, first_name: &str, last_name: &str, role: &str) -> User {
    User {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role: role.to_string(),
    }
}

/// Three managers and one reporter
pub fn seed_users(db: &mut Database) {
    db.insert_users_batch(&[
        user(1, "Olena", "Koval", "MANAGER"),
        user(2, "Taras", "Bondar", "MANAGER"),
        user(3, "Iryna", "Shevchuk", "MANAGER"),
        user(REPORTER_ID, "Petro", "Melnyk", "USER"),
    ])
    .unwrap();
}

pub fn request(
    id: i64,
    assignee_id: Option<i64>,
    status: ProgressStatus,
    created_at: NaiveDateTime,
) -> Request {
    Request {
        id,
        title: format!("Request #{}", id),
        reporter_id: REPORTER_ID,
        assignee_id,
        progress_status: status,
        created_at,
    }
}

/// `count` requests spread over 2022-01-01 .. 2025-01-01 with mixed
/// statuses and assignees
pub fn synthetic_requests(count: usize, seed: u64) -> Vec<Request> {
    let mut rng = StdRng::seed_from_u64(seed);
    let origin = at(2022, 1, 1, 0);

    (0..count)
        .map(|i| {
            let day: i64 = rng.gen_range(0..=3 * 365);
            let hour: i64 = rng.gen_range(0..24);
            let status = ProgressStatus::ALL[rng.gen_range(0..ProgressStatus::ALL.len())];
            let assignee = match rng.gen_range(0..=MANAGER_IDS.len()) {
                0 => None,
                n => Some(MANAGER_IDS[n - 1]),
            };
            let created_at = origin + chrono::Duration::days(day) + chrono::Duration::hours(hour);
            request(i as i64 + 1, assignee, status, created_at)
        })
        .collect()
}

/// Seed users plus `count` synthetic requests, returning the requests
pub fn seed_synthetic(db: &mut Database, count: usize, seed: u64) -> Vec<Request> {
    seed_users(db);
    let requests = synthetic_requests(count, seed);
    for chunk in requests.chunks(250) {
        db.insert_requests_batch(chunk).unwrap();
    }
    requests
}
