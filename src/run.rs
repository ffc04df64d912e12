//! Run orchestrator.
//!
//! Drives the pipeline for one invocation:
//! 1. Read each source in order
//! 2. Load every line into a record
//! 3. Fold accepted records into one shared aggregate
//! 4. Snapshot the aggregate after each source, finalize at the end
//!
//! The first fatal error stops everything and nothing is reported.

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::Aggregator;
use crate::ingest::{LoadOutcome, RecordError, RecordLoader, SkipReason};
use crate::input::{InputError, InputSource, LineReader};
use crate::models::AggregateStats;
use crate::parse::CenturyRule;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Options for a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Keep records spanning a day or more
    pub allow_outliers: bool,

    /// Two-digit year mapping for record timestamps
    pub century: CenturyRule,
}

/// Statistics after one source was consumed.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub name: String,
    /// Cumulative statistics up to and including this source
    pub snapshot: AggregateStats,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub sources: Vec<SourceSummary>,
    pub totals: AggregateStats,
}

impl RunReport {
    /// Per-source snapshots in processing order.
    pub fn snapshots(&self) -> Vec<AggregateStats> {
        self.sources.iter().map(|s| s.snapshot.clone()).collect()
    }
}

/// A run in progress.
pub struct Run {
    loader: RecordLoader,
    aggregator: Aggregator,
    sources: Vec<SourceSummary>,
}

impl Run {
    pub fn new(options: &RunOptions) -> Self {
        Self {
            loader: RecordLoader::new(options.allow_outliers).with_century(options.century),
            aggregator: Aggregator::new(),
            sources: Vec::new(),
        }
    }

    /// Open and consume one source.
    pub fn process_source(&mut self, source: &InputSource) -> Result<(), RunError> {
        let reader = source.open()?;
        self.consume(reader)
    }

    /// Consume every line of an already opened source.
    pub fn consume<R: BufRead>(&mut self, reader: LineReader<R>) -> Result<(), RunError> {
        let name = reader.name().to_string();
        info!("Processing {}", name);

        for line in reader {
            let line = line?;
            let record = self.aggregator.record_seen();

            match self.loader.load(&line.text, record)? {
                LoadOutcome::Accepted(interval) => {
                    debug!(
                        "START {} {}  END {} {}",
                        interval.start, interval.start_seconds, interval.end, interval.end_seconds
                    );
                    self.aggregator.accumulate(&interval);
                }
                LoadOutcome::Skipped(reason) => {
                    warn!(
                        "Skipping record {} ({} line {}): {}",
                        record, name, line.number, reason
                    );
                    if let SkipReason::Outlier { record: interval } = &reason {
                        debug!(
                            "START {} {}  END {} {}",
                            interval.start,
                            interval.start_seconds,
                            interval.end,
                            interval.end_seconds
                        );
                    }
                }
            }
        }

        let snapshot = self.aggregator.snapshot();
        info!(
            "Finished {}: {} records, {} selected",
            name, snapshot.total_records, snapshot.selected_records
        );
        self.sources.push(SourceSummary { name, snapshot });
        Ok(())
    }

    /// Finalize the shared aggregate.
    pub fn finish(self) -> RunReport {
        let totals = self.aggregator.finalize();
        if !totals.has_selection() {
            warn!(
                "No records selected out of {}; average not computed",
                totals.total_records
            );
        }

        RunReport {
            sources: self.sources,
            totals,
        }
    }
}

/// Process `sources` in order into one report.
pub fn run_sources(sources: &[InputSource], options: &RunOptions) -> Result<RunReport, RunError> {
    let mut run = Run::new(options);
    for source in sources {
        run.process_source(source)?;
    }
    Ok(run.finish())
}
