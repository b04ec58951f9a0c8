//! Request and user records as stored by the request tracker

use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressStatus {
    Free,
    Joined,
    InProgress,
    Closed,
    Canceled,
}

impl ProgressStatus {
    pub const ALL: [ProgressStatus; 5] = [
        ProgressStatus::Free,
        ProgressStatus::Joined,
        ProgressStatus::InProgress,
        ProgressStatus::Closed,
        ProgressStatus::Canceled,
    ];

    /// Name stored in the `progress_status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Free => "Free",
            ProgressStatus::Joined => "Joined",
            ProgressStatus::InProgress => "In progress",
            ProgressStatus::Closed => "Closed",
            ProgressStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = AppError;

    /// Case-insensitive; accepts `In progress`, `in_progress` and `inprogress`
    fn from_str(s: &str) -> AppResult<Self> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalised.as_str() {
            "free" => Ok(ProgressStatus::Free),
            "joined" => Ok(ProgressStatus::Joined),
            "inprogress" => Ok(ProgressStatus::InProgress),
            "closed" => Ok(ProgressStatus::Closed),
            "canceled" | "cancelled" => Ok(ProgressStatus::Canceled),
            _ => Err(AppError::InvalidData(format!(
                "Unknown progress status: {}",
                s
            ))),
        }
    }
}

/// Opaque filter key narrowing which requests are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum RequestFilter {
    /// Requests in the given progress status
    ByStatus { status: ProgressStatus },
    /// Requests in the given status assigned to one manager
    ByManager {
        status: ProgressStatus,
        manager_id: i64,
    },
}

impl RequestFilter {
    pub fn status(&self) -> ProgressStatus {
        match self {
            RequestFilter::ByStatus { status } | RequestFilter::ByManager { status, .. } => *status,
        }
    }

    pub fn manager_id(&self) -> Option<i64> {
        match self {
            RequestFilter::ByStatus { .. } => None,
            RequestFilter::ByManager { manager_id, .. } => Some(*manager_id),
        }
    }
}

impl fmt::Display for RequestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFilter::ByStatus { status } => write!(f, "status = {}", status),
            RequestFilter::ByManager { status, manager_id } => {
                write!(f, "status = {}, manager #{}", status, manager_id)
            }
        }
    }
}

/// User of the tracker (reporters and managers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// A tracked request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: i64,
    pub title: String,
    pub reporter_id: i64,
    pub assignee_id: Option<i64>,
    pub progress_status: ProgressStatus,
    pub created_at: NaiveDateTime,
}

impl Request {
    /// Whether this request is counted under `filter`
    pub fn matches(&self, filter: &RequestFilter) -> bool {
        if self.progress_status != filter.status() {
            return false;
        }
        match filter.manager_id() {
            Some(manager_id) => self.assignee_id == Some(manager_id),
            None => true,
        }
    }
}
