//! Gregorian calendar arithmetic.
//!
//! Everything here is computed from first principles rather than through a
//! platform time library:
//! - leap-year rule and month lengths
//! - seconds contributed by whole elapsed years since 1970
//! - seconds contributed by whole elapsed days inside a year
//!
//! [`validate`] checks a parsed [`DateTime`](crate::models::DateTime) and
//! [`epoch`] turns one into seconds since 1970-01-01T00:00:00.

pub mod epoch;
pub mod validate;

pub use epoch::{to_epoch_seconds, EpochError};
pub use validate::{is_valid, validate, ValidationError};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// First year representable as epoch seconds.
pub const EPOCH_YEAR: u32 = 1970;

/// Last year representable as epoch seconds.
pub const MAX_YEAR: u32 = 9999;

/// Proleptic Gregorian leap-year rule.
pub fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`, `None` for a month outside 1-12.
pub fn days_in_month(year: u32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

fn days_in_year(year: u32) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Seconds in all the full years between 1970 and the start of `year`.
///
/// Years before 1971 contribute nothing; callers keep `year` within
/// [`EPOCH_YEAR`]..=[`MAX_YEAR`].
pub fn seconds_for_elapsed_years(year: u32) -> i64 {
    let days: i64 = (EPOCH_YEAR + 1..=year).map(|y| days_in_year(y - 1)).sum();
    days * SECONDS_PER_DAY
}

/// Seconds between January 1st of `year` and the start of `month`/`day`.
pub fn seconds_for_elapsed_days_in_year(year: u32, month: u32, day: u32) -> i64 {
    let month_days: i64 = (1..month)
        .filter_map(|m| days_in_month(year, m))
        .map(i64::from)
        .sum();
    (month_days + i64::from(day) - 1) * SECONDS_PER_DAY
}
