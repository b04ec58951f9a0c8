//! Request period reporting - Type System
//!
//! - `period`: Date ranges, buckets and bucket series produced by the aggregator
//! - `request`: Requests, users, progress statuses and report filters
//! - `report`: Report result types consumed by the formatters

pub mod period;
pub mod report;
pub mod request;

pub use period::{Bucket, BucketKind, BucketSeries, DateRange, SparseCount};
pub use report::{BestManagersReport, ManagerRanking, PeriodReport};
pub use request::{ProgressStatus, Request, RequestFilter, User};
