//! Period bucketing and gap-filling
//!
//! Splits a half-open date range into calendar-month buckets and produces a
//! complete, gap-free, chronologically ordered [`BucketSeries`]:
//!
//! ```text
//!  start          first_boundary                  last_boundary        end
//!    |--- leading ---|--- month ---|--- month ---|--- trailing ---|
//!     boundary count   sparse monthly counts (zero-filled)  boundary count
//! ```
//!
//! ## Key Design Decisions
//!
//! - **Two collaborators**: sub-month edges come from a [`BoundaryCountSource`],
//!   the whole middle span from one [`PeriodCountSource`] call
//! - **Missing months are zero**: a month the sparse source does not report is
//!   synthesised with `count = 0`
//! - **First record wins**: duplicate `(year, month)` records are a source
//!   contract violation; the first is kept and a warning is logged
//! - **No silent zeros on failure**: any collaborator error aborts the whole
//!   aggregation as [`PeriodError::DataSource`]
//! - **Cancellation**: an optional [`CancellationToken`] is checked at every
//!   data-source boundary; a cancelled aggregation returns no partial series

use crate::errors::{AppError, AppResult, PeriodError, PeriodResult};
use crate::types::{Bucket, BucketKind, BucketSeries, DateRange, SparseCount};
use crate::utils::time::{add_months, first_of_month, first_of_next_month, months_between};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Count of matching entities in an arbitrary `[start, end)` sub-range
///
/// Implementations must return `Ok(0)` for a range with no matches.
pub trait BoundaryCountSource<K: ?Sized> {
    fn count_in_range(&self, start: NaiveDate, end: NaiveDate, key: &K) -> AppResult<u64>;
}

/// Per-month counts for the full calendar months overlapping `[start, end)`
///
/// Months with no matching entity may be omitted; omission means zero.
/// No ordering is guaranteed.
pub trait PeriodCountSource<K: ?Sized> {
    fn counts_by_month(&self, start: NaiveDate, end: NaiveDate, key: &K)
        -> AppResult<Vec<SparseCount>>;
}

impl<K, F> BoundaryCountSource<K> for F
where
    K: ?Sized,
    F: Fn(NaiveDate, NaiveDate, &K) -> AppResult<u64>,
{
    fn count_in_range(&self, start: NaiveDate, end: NaiveDate, key: &K) -> AppResult<u64> {
        self(start, end, key)
    }
}

impl<K, F> PeriodCountSource<K> for F
where
    K: ?Sized,
    F: Fn(NaiveDate, NaiveDate, &K) -> AppResult<Vec<SparseCount>>,
{
    fn counts_by_month(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        key: &K,
    ) -> AppResult<Vec<SparseCount>> {
        self(start, end, key)
    }
}

/// Cooperative cancellation flag shared between a caller and an aggregation
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Builds gap-free monthly bucket series from a pair of count sources
pub struct PeriodBucketAggregator<'a, B: ?Sized, P: ?Sized> {
    boundary_source: &'a B,
    period_source: &'a P,
    cancellation: Option<CancellationToken>,
}

impl<'a, B: ?Sized, P: ?Sized> PeriodBucketAggregator<'a, B, P> {
    pub fn new(boundary_source: &'a B, period_source: &'a P) -> Self {
        Self {
            boundary_source,
            period_source,
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Validate `[start, end)` and aggregate it
    pub fn aggregate_dates<K>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        key: &K,
    ) -> PeriodResult<BucketSeries>
    where
        K: ?Sized + Debug,
        B: BoundaryCountSource<K>,
        P: PeriodCountSource<K>,
    {
        let range = DateRange::new(start, end)?;
        self.aggregate(&range, key)
    }

    /// Produce the complete bucket series for `range` under `key`
    ///
    /// The series is the leading edge bucket, then every full calendar month
    /// between the two month boundaries, then the trailing edge bucket when
    /// it has non-zero width. A range that ends on or before the first month
    /// boundary yields a single bucket covering the whole range.
    pub fn aggregate<K>(&self, range: &DateRange, key: &K) -> PeriodResult<BucketSeries>
    where
        K: ?Sized + Debug,
        B: BoundaryCountSource<K>,
        P: PeriodCountSource<K>,
    {
        let start = range.start();
        let end = range.end();
        let first_boundary =
            first_of_next_month(start).ok_or(PeriodError::OutOfCalendar { date: start })?;

        if end <= first_boundary {
            debug!(
                "Range {}..{} fits before {}, single bucket for {:?}",
                start, end, first_boundary, key
            );
            let count = self.boundary_count("leading edge count", start, end, key)?;
            self.check_cancelled("series assembly")?;
            return Ok(BucketSeries::from_buckets(vec![Bucket::edge(
                BucketKind::LeadingEdge,
                start,
                end,
                count,
            )]));
        }

        let last_boundary = first_of_month(end);
        let month_count = months_between(first_boundary, last_boundary);
        debug!(
            "Aggregating {}..{} for {:?}: {} full month(s) between {} and {}",
            start, end, key, month_count, first_boundary, last_boundary
        );

        let mut buckets = Vec::with_capacity(month_count as usize + 2);

        let leading = self.boundary_count("leading edge count", start, first_boundary, key)?;
        buckets.push(Bucket::edge(
            BucketKind::LeadingEdge,
            start,
            first_boundary,
            leading,
        ));

        if month_count > 0 {
            self.check_cancelled("monthly counts")?;
            let sparse = self
                .period_source
                .counts_by_month(first_boundary, last_boundary, key)
                .map_err(|e| PeriodError::data_source("monthly counts", e))?;
            let index = index_sparse_counts(&sparse, first_boundary, last_boundary)?;

            for i in 0..month_count {
                let (bucket_start, bucket_end) = add_months(first_boundary, i)
                    .zip(add_months(first_boundary, i + 1))
                    .ok_or(PeriodError::OutOfCalendar { date: end })?;
                let count = index
                    .get(&(bucket_start.year(), bucket_start.month()))
                    .copied()
                    .unwrap_or(0);
                buckets.push(Bucket::full_month(bucket_start, bucket_end, count));
            }
        }

        if last_boundary != end {
            let trailing = self.boundary_count("trailing edge count", last_boundary, end, key)?;
            buckets.push(Bucket::edge(
                BucketKind::TrailingEdge,
                last_boundary,
                end,
                trailing,
            ));
        }

        self.check_cancelled("series assembly")?;
        Ok(BucketSeries::from_buckets(buckets))
    }

    fn boundary_count<K>(
        &self,
        operation: &str,
        start: NaiveDate,
        end: NaiveDate,
        key: &K,
    ) -> PeriodResult<u64>
    where
        K: ?Sized,
        B: BoundaryCountSource<K>,
    {
        self.check_cancelled(operation)?;
        self.boundary_source
            .count_in_range(start, end, key)
            .map_err(|e| PeriodError::data_source(operation, e))
    }

    fn check_cancelled(&self, operation: &str) -> PeriodResult<()> {
        match &self.cancellation {
            Some(token) if token.is_cancelled() => Err(PeriodError::Cancelled {
                operation: operation.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Index sparse records by `(year, month)`, keeping the first of any duplicates
fn index_sparse_counts(
    sparse: &[SparseCount],
    span_start: NaiveDate,
    span_end: NaiveDate,
) -> PeriodResult<HashMap<(i32, u32), u64>> {
    let mut index: HashMap<(i32, u32), u64> = HashMap::with_capacity(sparse.len());

    for record in sparse {
        if !(1..=12).contains(&record.month) {
            return Err(PeriodError::data_source(
                "monthly counts",
                AppError::InvalidData(format!(
                    "month {} out of range in record for year {}",
                    record.month, record.year
                )),
            ));
        }

        let month_start = NaiveDate::from_ymd_opt(record.year, record.month, 1);
        if !month_start.is_some_and(|d| span_start <= d && d < span_end) {
            warn!(
                "Ignoring monthly count for {}-{:02} outside {}..{}",
                record.year, record.month, span_start, span_end
            );
            continue;
        }

        match index.entry((record.year, record.month)) {
            std::collections::hash_map::Entry::Occupied(existing) => {
                warn!(
                    "Duplicate monthly count for {}-{:02} (kept {}, ignored {})",
                    record.year,
                    record.month,
                    existing.get(),
                    record.count
                );
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(record.count);
            }
        }
    }

    Ok(index)
}
