//! Date/time string parsing.
//!
//! Turns loosely formatted text into a validated [`DateTime`]. Accepted
//! shapes:
//! - `YYMMDD` / `YYYYMMDD`, optionally glued to a time (`YYYYMMDDhhmmss`)
//! - delimited dates (`MM/DD/YY`, `DD/MM/YYYY`, `YYYY-MM-DD`, ...)
//! - a date and a time separated by a space, time with or without colons
//!   and an optional AM/PM marker

mod date;
mod time;

use thiserror::Error;

use crate::calendar::{validate, ValidationError};
use crate::models::{DateLayout, DateTime};

/// Why a string could not be turned into a date/time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty date/time string")]
    Empty,

    #[error("expected 3 date fields, found {0}")]
    DateFieldCount(usize),

    #[error("date field '{0}' is not numeric")]
    NonNumericField(String),

    #[error("undelimited date '{0}' must be 6 or 8 digits")]
    DateLength(String),

    #[error("time '{0}' has an unrecognized shape")]
    TimeShape(String),

    #[error("time field '{0}' is not numeric")]
    NonNumericTime(String),

    #[error("time {hour:02}:{minute:02}:{second:02} is out of range")]
    TimeOutOfRange { hour: u32, minute: u32, second: u32 },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Two-digit year to four-digit year mapping.
///
/// Years at or above `cutoff` belong to `current_century`, years below it to
/// `next_century`. With the defaults, `95` is 1995 and `05` is 2005.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenturyRule {
    pub cutoff: u32,
    pub current_century: u32,
    pub next_century: u32,
}

impl Default for CenturyRule {
    fn default() -> Self {
        Self {
            cutoff: 90,
            current_century: 19,
            next_century: 20,
        }
    }
}

impl CenturyRule {
    /// Four-digit year for a two-digit one.
    pub fn resolve(&self, short_year: u32) -> u32 {
        if short_year > 99 {
            1900 + short_year
        } else if short_year >= self.cutoff {
            self.current_century * 100 + short_year
        } else {
            self.next_century * 100 + short_year
        }
    }
}

/// Parser configured with a date layout hint and century rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeParser {
    layout: DateLayout,
    century: CenturyRule,
}

impl DateTimeParser {
    pub fn new(layout: DateLayout) -> Self {
        Self {
            layout,
            century: CenturyRule::default(),
        }
    }

    /// Use a different two-digit year mapping.
    pub fn with_century(mut self, century: CenturyRule) -> Self {
        self.century = century;
        self
    }

    pub fn layout(&self) -> DateLayout {
        self.layout
    }

    /// Parse and validate a combined date/time string.
    ///
    /// Nothing partially parsed escapes: on any failure the caller only sees
    /// the error.
    pub fn parse(&self, raw: &str) -> Result<DateTime, ParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        let (date_text, time_text) = split_date_time(raw);

        let mut dt = DateTime::default();
        date::parse_date(date_text, self.layout, &self.century)?.apply(&mut dt);
        if let Some(time_text) = time_text {
            time::parse_time(time_text)?.apply(&mut dt);
        }

        validate(&dt)?;
        Ok(dt)
    }
}

/// Parse `raw` with the given layout and the default century rule.
pub fn parse(raw: &str, layout: DateLayout) -> Result<DateTime, ParseError> {
    DateTimeParser::new(layout).parse(raw)
}

/// Split into date and optional time text.
///
/// The first space separates the two. Without one, strings of 12/15
/// characters carry a 6-character date and strings of 14/17 characters an
/// 8-character date; anything else is all date.
fn split_date_time(raw: &str) -> (&str, Option<&str>) {
    if let Some((date, time)) = raw.split_once(' ') {
        return (date.trim(), Some(time.trim()));
    }

    let date_len = match raw.len() {
        12 | 15 => 6,
        14 | 17 => 8,
        _ => return (raw, None),
    };

    if !raw.is_char_boundary(date_len) {
        return (raw, None);
    }
    let (date, time) = raw.split_at(date_len);
    (date, Some(time))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
