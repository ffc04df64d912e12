//! Time-of-day half of a date/time string.

use super::{is_digits, ParseError};
use crate::models::DateTime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct TimeFields {
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

impl TimeFields {
    pub(super) fn apply(self, dt: &mut DateTime) {
        dt.hour = self.hour;
        dt.minute = self.minute;
        dt.second = self.second;
        dt.millisecond = self.millisecond;
    }
}

/// Parse `HHMM`, `HHMMSS`, `HHMMSSmmm`, `HHMMSS.fff` or `H:MM[:SS[.fff]]`,
/// each optionally followed by AM/PM.
///
/// Empty text is midnight. The range check runs before the PM shift, so
/// `12:30 PM` comes out as hour 24.
pub(super) fn parse_time(raw: &str) -> Result<TimeFields, ParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(TimeFields::default());
    }

    let body = strip_meridiem(text);
    let mut time = if body.contains(':') {
        parse_colon(body)?
    } else {
        parse_compact(body)?
    };

    if time.hour > 24
        || time.minute > 59
        || time.second > 59
        || (time.hour == 24 && (time.minute > 0 || time.second > 0))
    {
        return Err(ParseError::TimeOutOfRange {
            hour: time.hour,
            minute: time.minute,
            second: time.second,
        });
    }

    if time.hour < 13 && (raw.contains("PM") || raw.contains("pm")) {
        time.hour += 12;
    }

    Ok(time)
}

fn strip_meridiem(text: &str) -> &str {
    let len = text.len();
    match text.get(len.saturating_sub(2)..) {
        Some(tail) if tail.eq_ignore_ascii_case("am") || tail.eq_ignore_ascii_case("pm") => {
            text[..len - 2].trim_end()
        }
        _ => text,
    }
}

fn parse_compact(body: &str) -> Result<TimeFields, ParseError> {
    if !body.is_ascii() {
        return Err(ParseError::NonNumericTime(body.to_string()));
    }

    let all_digits = is_digits(body);
    match body.len() {
        4 | 6 | 9 if all_digits => Ok(TimeFields {
            hour: digits(&body[0..2])?,
            minute: digits(&body[2..4])?,
            second: body.get(4..6).map(digits).transpose()?.unwrap_or(0),
            millisecond: body.get(6..9).map(digits).transpose()?.unwrap_or(0),
        }),
        4 => Err(ParseError::NonNumericTime(body.to_string())),
        len if len > 6 || (len > 4 && !all_digits) => {
            if !is_digits(&body[..4]) {
                return Err(ParseError::NonNumericTime(body.to_string()));
            }
            let (second, millisecond) = decimal_seconds(&body[4..])?;
            Ok(TimeFields {
                hour: digits(&body[0..2])?,
                minute: digits(&body[2..4])?,
                second,
                millisecond,
            })
        }
        _ => Err(ParseError::TimeShape(body.to_string())),
    }
}

fn parse_colon(body: &str) -> Result<TimeFields, ParseError> {
    if body.starts_with(':') {
        return Err(ParseError::TimeShape(body.to_string()));
    }

    let mut parts = body.splitn(3, ':');
    let hour = leading_int(parts.next().unwrap_or_default())?;
    let minute = leading_int(parts.next().unwrap_or_default())?;
    let (second, millisecond) = match parts.next() {
        Some(seconds) => decimal_seconds(seconds)?,
        None => (0, 0),
    };

    Ok(TimeFields {
        hour,
        minute,
        second,
        millisecond,
    })
}

fn digits(text: &str) -> Result<u32, ParseError> {
    if !is_digits(text) {
        return Err(ParseError::NonNumericTime(text.to_string()));
    }
    text.parse()
        .map_err(|_| ParseError::NonNumericTime(text.to_string()))
}

/// Leading run of digits, ignoring whatever follows.
fn leading_int(text: &str) -> Result<u32, ParseError> {
    let text = text.trim();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    digits(&text[..end]).map_err(|_| ParseError::NonNumericTime(text.to_string()))
}

/// Leading decimal number of seconds split into whole seconds and milliseconds.
fn decimal_seconds(text: &str) -> Result<(u32, u32), ParseError> {
    let text = text.trim();
    let whole_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (whole, rest) = text.split_at(whole_end);

    let fraction = rest
        .strip_prefix('.')
        .map(|f| {
            let end = f.find(|c: char| !c.is_ascii_digit()).unwrap_or(f.len());
            &f[..end]
        })
        .unwrap_or_default();

    if whole.is_empty() && fraction.is_empty() {
        return Err(ParseError::NonNumericTime(text.to_string()));
    }

    let seconds: f64 = format!("{}.{}", if whole.is_empty() { "0" } else { whole }, fraction)
        .trim_end_matches('.')
        .parse()
        .map_err(|_| ParseError::NonNumericTime(text.to_string()))?;

    let second = seconds.trunc() as u32;
    let millisecond = ((seconds.fract() * 1000.0).round() as u32).min(999);
    Ok((second, millisecond))
}
