//! Elapsed-time statistics.
//!
//! [`Aggregator`] folds accepted records into running totals and is
//! consumed by [`Aggregator::finalize`], which computes the average exactly
//! once.

use crate::models::{AggregateStats, IntervalRecord};

/// Starting minimum, larger than any realistic duration.
pub const MIN_SENTINEL: i64 = 9_999_999_999;

/// Running totals for one run.
#[derive(Debug, Clone)]
pub struct Aggregator {
    total_records: u64,
    selected_records: u64,
    total_seconds: i64,
    min_seconds: i64,
    max_seconds: i64,
    label: Option<String>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            total_records: 0,
            selected_records: 0,
            total_seconds: 0,
            min_seconds: MIN_SENTINEL,
            max_seconds: 0,
            label: None,
        }
    }

    /// Count a line, whether or not it ends up selected. Returns its ordinal.
    pub fn record_seen(&mut self) -> u64 {
        self.total_records += 1;
        self.total_records
    }

    /// Fold an accepted record into the totals.
    pub fn accumulate(&mut self, record: &IntervalRecord) {
        if self.label.is_none() {
            self.label = record.label.clone();
        }

        self.selected_records += 1;
        self.total_seconds = self.total_seconds.saturating_add(record.elapsed_seconds);
        self.min_seconds = self.min_seconds.min(record.elapsed_seconds);
        self.max_seconds = self.max_seconds.max(record.elapsed_seconds);
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn selected_records(&self) -> u64 {
        self.selected_records
    }

    /// Statistics as of now, leaving the aggregator running.
    pub fn snapshot(&self) -> AggregateStats {
        self.clone().finalize()
    }

    /// Finish the run. Min, max and average stay `None` when nothing was
    /// selected.
    pub fn finalize(self) -> AggregateStats {
        let selected = self.selected_records > 0;
        let average_seconds = calculate_average(self.total_seconds, self.selected_records);

        AggregateStats {
            total_records: self.total_records,
            selected_records: self.selected_records,
            total_seconds: self.total_seconds,
            minimum_seconds: selected.then_some(self.min_seconds),
            maximum_seconds: selected.then_some(self.max_seconds),
            average_seconds,
            label: self.label,
        }
    }
}

/// Truncating average, `None` for an empty selection.
pub fn calculate_average(total_seconds: i64, count: u64) -> Option<i64> {
    if count == 0 {
        return None;
    }
    i64::try_from(count).ok().map(|count| total_seconds / count)
}
