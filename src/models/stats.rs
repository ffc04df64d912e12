//! Finalized run statistics.

use serde::{Deserialize, Serialize};

/// Aggregate elapsed-time statistics for a run.
///
/// Produced once by [`crate::calculate::Aggregator::finalize`]. Minimum,
/// maximum and average are `None` when no record was selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Every line read, including skipped ones
    pub total_records: u64,

    /// Records folded into the statistics
    pub selected_records: u64,

    /// Sum of elapsed seconds over selected records
    pub total_seconds: i64,

    pub minimum_seconds: Option<i64>,
    pub maximum_seconds: Option<i64>,

    /// `total_seconds / selected_records`, truncated
    pub average_seconds: Option<i64>,

    /// Label of the first selected record that carried one
    pub label: Option<String>,
}

impl AggregateStats {
    /// Lines read but not folded into the statistics.
    pub fn bypassed_records(&self) -> u64 {
        self.total_records.saturating_sub(self.selected_records)
    }

    /// Whether any record made it into the statistics.
    pub fn has_selection(&self) -> bool {
        self.selected_records > 0
    }
}
