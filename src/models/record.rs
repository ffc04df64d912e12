//! One parsed input line.

use serde::{Deserialize, Serialize};

use super::DateTime;

/// A start/end pair read from one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRecord {
    /// 1-based ordinal across the whole run, rejected lines included
    pub record: u64,

    pub start: DateTime,
    pub end: DateTime,

    /// Seconds since the epoch for `start`
    pub start_seconds: i64,

    /// Seconds since the epoch for `end`
    pub end_seconds: i64,

    /// `end_seconds - start_seconds`, never negative once accepted
    pub elapsed_seconds: i64,

    /// Free text following the timestamps, if any
    pub label: Option<String>,
}

impl IntervalRecord {
    /// Whether the interval spans at least one full day.
    pub fn is_outlier(&self) -> bool {
        self.elapsed_seconds >= crate::calendar::SECONDS_PER_DAY
    }
}
