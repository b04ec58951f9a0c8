//! Period bucketing types
//!
//! `DateRange` is the half-open interval requested by a caller, `Bucket` one
//! contiguous sub-interval with its count, and `BucketSeries` the complete
//! ordered result handed to the reporting layer.

use crate::errors::{PeriodError, PeriodResult};
use crate::utils::time::{first_of_next_month, month_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting empty (`start == end`) and reversed ranges
    ///
    /// `end` must also have a following month, so that every month boundary
    /// inside the range is representable.
    pub fn new(start: NaiveDate, end: NaiveDate) -> PeriodResult<Self> {
        if start >= end {
            return Err(PeriodError::InvalidRange { start, end });
        }
        if first_of_next_month(end).is_none() {
            return Err(PeriodError::OutOfCalendar { date: end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside `[start, end)`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Which part of the requested range a bucket covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// Partial first month, from the range start up to the next 1st
    LeadingEdge,
    /// Exactly one calendar month, 1st to 1st
    FullMonth,
    /// Partial last month, from its 1st up to the range end
    TrailingEdge,
}

/// One contiguous sub-interval `[start_date, end_date)` with its count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub count: u64,
    pub label: Option<String>,
    pub kind: BucketKind,
}

impl Bucket {
    /// Edge bucket labelled `YYYY-MM-DD..YYYY-MM-DD`
    pub fn edge(kind: BucketKind, start_date: NaiveDate, end_date: NaiveDate, count: u64) -> Self {
        Self {
            start_date,
            end_date,
            count,
            label: Some(format!("{}..{}", start_date, end_date)),
            kind,
        }
    }

    /// Full-month bucket labelled `YYYY-MM`
    pub fn full_month(start_date: NaiveDate, end_date: NaiveDate, count: u64) -> Self {
        Self {
            start_date,
            end_date,
            count,
            label: Some(month_label(start_date)),
            kind: BucketKind::FullMonth,
        }
    }

    /// Width of the bucket in days
    pub fn width_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Complete, chronologically ordered, contiguous series of buckets
///
/// Only the aggregator builds a series; callers get read-only access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BucketSeries {
    buckets: Vec<Bucket>,
}

impl BucketSeries {
    pub(crate) fn from_buckets(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all bucket counts
    pub fn total(&self) -> u64 {
        self.buckets
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.count))
    }

    /// Number of full-month buckets with a zero count
    pub fn empty_months(&self) -> usize {
        self.buckets
            .iter()
            .filter(|b| b.kind == BucketKind::FullMonth && b.count == 0)
            .count()
    }

    /// Every bucket ends where the next one starts, and none is empty
    pub fn is_contiguous(&self) -> bool {
        self.buckets.iter().all(|b| b.start_date < b.end_date)
            && self
                .buckets
                .windows(2)
                .all(|pair| pair[0].end_date == pair[1].start_date)
    }

    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }
}

impl<'a> IntoIterator for &'a BucketSeries {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Raw per-month aggregate returned by a `PeriodCountSource`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseCount {
    pub year: i32,
    /// Calendar month, 1..=12
    pub month: u32,
    pub count: u64,
}

impl SparseCount {
    pub fn new(year: i32, month: u32, count: u64) -> Self {
        Self { year, month, count }
    }
}
