//! Calendar validity checks for parsed dates.

use thiserror::Error;

use super::{days_in_month, MAX_YEAR};
use crate::models::DateTime;

/// First calendar check a date failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("year {0} is outside 0-9999")]
    Year(u32),

    #[error("two-digit year {0} is outside 0-99")]
    ShortYear(u32),

    #[error("month {0} is outside 1-12")]
    Month(u32),

    #[error("day must be at least 1")]
    DayZero,

    #[error("two-digit year {short_year:02} does not match year {year}")]
    YearMismatch { year: u32, short_year: u32 },

    #[error("day {day} is past the end of month {month} in {year}")]
    DayOutOfMonth { year: u32, month: u32, day: u32 },
}

/// Check the date half of `dt`, reporting the first failing rule.
///
/// Rules run in a fixed order: year range, two-digit year range, month
/// range, day lower bound, year agreement, then month length.
pub fn validate(dt: &DateTime) -> Result<(), ValidationError> {
    if dt.year > MAX_YEAR {
        return Err(ValidationError::Year(dt.year));
    }
    if dt.short_year > 99 {
        return Err(ValidationError::ShortYear(dt.short_year));
    }
    if !(1..=12).contains(&dt.month) {
        return Err(ValidationError::Month(dt.month));
    }
    if dt.day < 1 {
        return Err(ValidationError::DayZero);
    }
    if dt.year % 100 != dt.short_year {
        return Err(ValidationError::YearMismatch {
            year: dt.year,
            short_year: dt.short_year,
        });
    }

    match days_in_month(dt.year, dt.month) {
        Some(last) if dt.day <= last => Ok(()),
        Some(_) => Err(ValidationError::DayOutOfMonth {
            year: dt.year,
            month: dt.month,
            day: dt.day,
        }),
        None => Err(ValidationError::Month(dt.month)),
    }
}

/// Whether `dt` is a legal calendar date.
pub fn is_valid(dt: &DateTime) -> bool {
    validate(dt).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: u32, month: u32, day: u32) -> DateTime {
        DateTime::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    #[test]
    fn test_valid_dates() {
        assert!(is_valid(&date(2024, 2, 29)));
        assert!(is_valid(&date(2000, 2, 29)));
        assert!(is_valid(&date(2023, 12, 31)));
        assert!(is_valid(&date(1970, 1, 1)));
        assert!(is_valid(&date(9999, 12, 31)));
    }

    #[test]
    fn test_leap_day_in_common_year() {
        assert_eq!(
            validate(&date(2023, 2, 29)),
            Err(ValidationError::DayOutOfMonth {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(!is_valid(&date(1900, 2, 29)));
    }

    #[test]
    fn test_thirty_day_months() {
        for month in [4, 6, 9, 11] {
            assert!(is_valid(&date(2023, month, 30)));
            assert!(!is_valid(&date(2023, month, 31)));
        }
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(validate(&date(2023, 0, 1)), Err(ValidationError::Month(0)));
        assert_eq!(validate(&date(2023, 13, 1)), Err(ValidationError::Month(13)));
    }

    #[test]
    fn test_day_zero() {
        assert_eq!(validate(&date(2023, 5, 0)), Err(ValidationError::DayZero));
    }

    #[test]
    fn test_year_bounds() {
        let mut dt = date(2023, 1, 1);
        dt.year = 10_000;
        assert_eq!(validate(&dt), Err(ValidationError::Year(10_000)));

        let mut dt = date(2023, 1, 1);
        dt.short_year = 100;
        assert_eq!(validate(&dt), Err(ValidationError::ShortYear(100)));
    }

    #[test]
    fn test_year_mismatch() {
        let mut dt = date(2024, 1, 1);
        dt.short_year = 23;
        assert_eq!(
            validate(&dt),
            Err(ValidationError::YearMismatch {
                year: 2024,
                short_year: 23
            })
        );
    }

    #[test]
    fn test_zeroed_value_is_invalid() {
        assert!(!is_valid(&DateTime::default()));
    }
}
