//! Record loading.
//!
//! Turns one input line into an [`IntervalRecord`]. A line is two 14-digit
//! `YYYYMMDDhhmmss` timestamps followed by an optional label:
//!
//! ```text
//! 2024010100000020240101010000nightly-backup
//! 20240101000000  20240101010000  nightly-backup
//! ```
//!
//! Short lines and outliers are skipped; anything wrong with the
//! timestamps themselves is fatal for the whole run.

use thiserror::Error;
use tracing::debug;

use crate::calendar::{to_epoch_seconds, EpochError};
use crate::models::{DateLayout, DateTime, IntervalRecord};
use crate::parse::{CenturyRule, DateTimeParser, ParseError};

/// Width of one timestamp field.
pub const TIMESTAMP_WIDTH: usize = 14;

/// Shortest line that can hold both timestamps.
pub const MIN_RECORD_LEN: usize = 2 * TIMESTAMP_WIDTH;

/// Labels longer than this are truncated.
pub const MAX_LABEL_LEN: usize = 512;

/// Problems that stop the run.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record {record}: timestamp '{text}' is not a 14-digit number")]
    NonNumeric { record: u64, text: String },

    #[error("record {record}: invalid timestamp '{text}'")]
    InvalidTimestamp {
        record: u64,
        text: String,
        #[source]
        source: ParseError,
    },

    #[error("record {record}: timestamp '{text}' cannot be converted to seconds")]
    OutOfRange {
        record: u64,
        text: String,
        #[source]
        source: EpochError,
    },

    #[error(
        "record {record}: start is after end\n  START {start} {start_seconds}\n  END   {end} {end_seconds}"
    )]
    StartAfterEnd {
        record: u64,
        start: DateTime,
        end: DateTime,
        start_seconds: i64,
        end_seconds: i64,
    },
}

impl RecordError {
    /// Ordinal of the offending record.
    pub fn record(&self) -> u64 {
        match self {
            RecordError::NonNumeric { record, .. }
            | RecordError::InvalidTimestamp { record, .. }
            | RecordError::OutOfRange { record, .. }
            | RecordError::StartAfterEnd { record, .. } => *record,
        }
    }
}

/// Why a line was left out of the statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than [`MIN_RECORD_LEN`] bytes
    ShortLine { length: usize },
    /// Spans a day or more and outliers are not allowed
    Outlier { record: Box<IntervalRecord> },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ShortLine { length } => {
                write!(f, "line is {} bytes, need at least {}", length, MIN_RECORD_LEN)
            }
            SkipReason::Outlier { record } => {
                write!(f, "elapsed {}s is a day or more", record.elapsed_seconds)
            }
        }
    }
}

/// Result of loading one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Accepted(IntervalRecord),
    Skipped(SkipReason),
}

/// Loads lines into records.
#[derive(Debug, Clone, Copy)]
pub struct RecordLoader {
    parser: DateTimeParser,
    allow_outliers: bool,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new(false)
    }
}

impl RecordLoader {
    pub fn new(allow_outliers: bool) -> Self {
        Self {
            parser: DateTimeParser::new(DateLayout::Compact),
            allow_outliers,
        }
    }

    /// Use a different two-digit year mapping for the timestamps.
    pub fn with_century(mut self, century: CenturyRule) -> Self {
        self.parser = self.parser.with_century(century);
        self
    }

    /// Load line number `record` (1-based, counting every line of the run).
    pub fn load(&self, line: &str, record: u64) -> Result<LoadOutcome, RecordError> {
        let bytes = line.as_bytes();
        if bytes.len() < MIN_RECORD_LEN {
            return Ok(LoadOutcome::Skipped(SkipReason::ShortLine {
                length: bytes.len(),
            }));
        }

        let fields = split_fields(bytes);
        let (start, start_seconds) = self.load_timestamp(fields.start, record)?;
        let (end, end_seconds) = self.load_timestamp(fields.end, record)?;

        if start_seconds > end_seconds {
            return Err(RecordError::StartAfterEnd {
                record,
                start,
                end,
                start_seconds,
                end_seconds,
            });
        }

        let interval = IntervalRecord {
            record,
            start,
            end,
            start_seconds,
            end_seconds,
            elapsed_seconds: end_seconds - start_seconds,
            label: label_text(fields.label),
        };

        if !interval.is_outlier() || self.allow_outliers {
            Ok(LoadOutcome::Accepted(interval))
        } else {
            Ok(LoadOutcome::Skipped(SkipReason::Outlier {
                record: Box::new(interval),
            }))
        }
    }

    fn load_timestamp(&self, raw: &[u8], record: u64) -> Result<(DateTime, i64), RecordError> {
        let text = match std::str::from_utf8(raw) {
            Ok(text) if raw.len() == TIMESTAMP_WIDTH && raw.iter().all(u8::is_ascii_digit) => text,
            _ => {
                return Err(RecordError::NonNumeric {
                    record,
                    text: String::from_utf8_lossy(raw).into_owned(),
                })
            }
        };

        let dt = self
            .parser
            .parse(text)
            .map_err(|source| RecordError::InvalidTimestamp {
                record,
                text: text.to_string(),
                source,
            })?;

        let seconds = to_epoch_seconds(&dt).map_err(|source| RecordError::OutOfRange {
            record,
            text: text.to_string(),
            source,
        })?;

        debug!(record, timestamp = text, seconds, "loaded timestamp");
        Ok((dt, seconds))
    }
}

/// Load one line with the default century rule.
pub fn load_record(
    line: &str,
    record: u64,
    allow_outliers: bool,
) -> Result<LoadOutcome, RecordError> {
    RecordLoader::new(allow_outliers).load(line, record)
}

struct Fields<'a> {
    start: &'a [u8],
    end: &'a [u8],
    label: &'a [u8],
}

/// Fixed columns, unless whitespace follows the start timestamp, in which
/// case the end timestamp is the next whitespace-delimited token.
fn split_fields(bytes: &[u8]) -> Fields<'_> {
    let start = &bytes[..TIMESTAMP_WIDTH];

    if !bytes[TIMESTAMP_WIDTH].is_ascii_whitespace() {
        return Fields {
            start,
            end: &bytes[TIMESTAMP_WIDTH..MIN_RECORD_LEN],
            label: &bytes[MIN_RECORD_LEN..],
        };
    }

    let rest = skip_whitespace(&bytes[TIMESTAMP_WIDTH..]);
    let end_len = rest
        .iter()
        .position(u8::is_ascii_whitespace)
        .unwrap_or(rest.len());
    Fields {
        start,
        end: &rest[..end_len],
        label: skip_whitespace(&rest[end_len..]),
    }
}

fn skip_whitespace(bytes: &[u8]) -> &[u8] {
    let first = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[first..]
}

fn label_text(raw: &[u8]) -> Option<String> {
    let raw = skip_whitespace(raw);
    if raw.is_empty() {
        return None;
    }
    let label: String = String::from_utf8_lossy(raw)
        .chars()
        .take(MAX_LABEL_LEN)
        .collect();
    Some(label)
}
