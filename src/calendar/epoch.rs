//! Date/time to seconds since 1970-01-01T00:00:00.

use thiserror::Error;

use super::{
    seconds_for_elapsed_days_in_year, seconds_for_elapsed_years, EPOCH_YEAR, MAX_YEAR,
};
use crate::models::DateTime;

/// The date falls outside the convertible range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpochError {
    #[error("year {0} is before 1970")]
    BeforeEpoch(u32),

    #[error("year {0} is after 9999")]
    AfterLimit(u32),

    #[error("{month:02}/{day:02}/9999 is past the last convertible date")]
    PastLimitDate { month: u32, day: u32 },
}

/// Convert a validated date/time to epoch seconds.
///
/// Only December of year 9999 is convertible in that final year. Time
/// fields are added as-is, so 24:00:00 lands on the following midnight.
pub fn to_epoch_seconds(dt: &DateTime) -> Result<i64, EpochError> {
    if dt.year < EPOCH_YEAR {
        return Err(EpochError::BeforeEpoch(dt.year));
    }
    if dt.year > MAX_YEAR {
        return Err(EpochError::AfterLimit(dt.year));
    }
    if dt.year == MAX_YEAR && (dt.month != 12 || dt.day > 31) {
        return Err(EpochError::PastLimitDate {
            month: dt.month,
            day: dt.day,
        });
    }

    Ok(seconds_for_elapsed_years(dt.year)
        + seconds_for_elapsed_days_in_year(dt.year, dt.month, dt.day)
        + i64::from(dt.hour) * 3600
        + i64::from(dt.minute) * 60
        + i64::from(dt.second))
}
