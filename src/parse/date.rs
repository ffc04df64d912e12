//! Date half of a date/time string.

use super::{is_digits, CenturyRule, ParseError};
use crate::models::{DateLayout, DateTime};

/// The year as it appeared in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearField {
    Short(u32),
    Full(u32),
}

/// Parsed date fields with both year forms reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct DateFields {
    month: u32,
    day: u32,
    short_year: u32,
    year: u32,
}

impl DateFields {
    fn new(month: u32, day: u32, year: YearField, century: &CenturyRule) -> Self {
        let (short_year, year) = match year {
            YearField::Short(yy) => (yy, century.resolve(yy)),
            YearField::Full(yyyy) => (yyyy % 100, yyyy),
        };
        Self {
            month,
            day,
            short_year,
            year,
        }
    }

    pub(super) fn apply(self, dt: &mut DateTime) {
        dt.month = self.month;
        dt.day = self.day;
        dt.short_year = self.short_year;
        dt.year = self.year;
    }
}

pub(super) fn parse_date(
    text: &str,
    layout: DateLayout,
    century: &CenturyRule,
) -> Result<DateFields, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    match delimiter(text) {
        Some(delim) => parse_delimited(text, delim, layout, century),
        None => parse_compact(text, century),
    }
}

/// `/` wins over `-` when both appear.
fn delimiter(text: &str) -> Option<char> {
    ['/', '-'].into_iter().find(|d| text.contains(*d))
}

fn parse_compact(text: &str, century: &CenturyRule) -> Result<DateFields, ParseError> {
    if !is_digits(text) {
        return Err(ParseError::NonNumericField(text.to_string()));
    }

    match text.len() {
        6 => Ok(DateFields::new(
            number(&text[2..4])?,
            number(&text[4..6])?,
            YearField::Short(number(&text[0..2])?),
            century,
        )),
        8 => Ok(DateFields::new(
            number(&text[4..6])?,
            number(&text[6..8])?,
            YearField::Full(number(&text[0..4])?),
            century,
        )),
        _ => Err(ParseError::DateLength(text.to_string())),
    }
}

fn parse_delimited(
    text: &str,
    delim: char,
    layout: DateLayout,
    century: &CenturyRule,
) -> Result<DateFields, ParseError> {
    let fields: Vec<&str> = text.split(delim).filter(|f| !f.is_empty()).collect();
    if fields.len() != 3 {
        return Err(ParseError::DateFieldCount(fields.len()));
    }
    if let Some(bad) = fields.iter().find(|f| !is_digits(f)) {
        return Err(ParseError::NonNumericField(bad.to_string()));
    }

    let (first, second, third) = (fields[0], fields[1], fields[2]);

    // A four-digit lead field can only be a year
    if first.len() == 4 {
        return Ok(DateFields::new(
            number(second)?,
            number(third)?,
            YearField::Full(number(first)?),
            century,
        ));
    }

    let fields = match layout {
        DateLayout::YearFirst => {
            DateFields::new(number(second)?, number(third)?, year_field(first)?, century)
        }
        DateLayout::DayFirst => {
            DateFields::new(number(second)?, number(first)?, year_field(third)?, century)
        }
        DateLayout::MonthFirst | DateLayout::Compact => {
            DateFields::new(number(first)?, number(second)?, year_field(third)?, century)
        }
    };
    Ok(fields)
}

/// Exactly two digits is a two-digit year; any other width is taken literally.
fn year_field(text: &str) -> Result<YearField, ParseError> {
    let value = number(text)?;
    if text.len() == 2 {
        Ok(YearField::Short(value))
    } else {
        Ok(YearField::Full(value))
    }
}

fn number(text: &str) -> Result<u32, ParseError> {
    text.parse()
        .map_err(|_| ParseError::NonNumericField(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str, layout: DateLayout) -> Result<DateFields, ParseError> {
        parse_date(text, layout, &CenturyRule::default())
    }

    fn fields(year: u32, month: u32, day: u32) -> DateFields {
        DateFields {
            month,
            day,
            short_year: year % 100,
            year,
        }
    }

    #[test]
    fn test_compact_six_digits() {
        assert_eq!(date("050315", DateLayout::Compact), Ok(fields(2005, 3, 15)));
        assert_eq!(date("951231", DateLayout::Compact), Ok(fields(1995, 12, 31)));
    }

    #[test]
    fn test_compact_eight_digits() {
        assert_eq!(date("20240229", DateLayout::Compact), Ok(fields(2024, 2, 29)));
    }

    #[test]
    fn test_compact_wrong_length() {
        assert_eq!(
            date("2024011", DateLayout::Compact),
            Err(ParseError::DateLength("2024011".to_string()))
        );
    }

    #[test]
    fn test_compact_non_numeric() {
        assert_eq!(
            date("2024O101", DateLayout::Compact),
            Err(ParseError::NonNumericField("2024O101".to_string()))
        );
    }

    #[test]
    fn test_month_first() {
        assert_eq!(date("03/15/24", DateLayout::MonthFirst), Ok(fields(2024, 3, 15)));
        assert_eq!(date("03/15/1998", DateLayout::MonthFirst), Ok(fields(1998, 3, 15)));
    }

    #[test]
    fn test_compact_hint_reads_delimited_as_month_first() {
        assert_eq!(date("03/15/24", DateLayout::Compact), Ok(fields(2024, 3, 15)));
    }

    #[test]
    fn test_day_first() {
        assert_eq!(date("15/03/24", DateLayout::DayFirst), Ok(fields(2024, 3, 15)));
        assert_eq!(date("15-03-1991", DateLayout::DayFirst), Ok(fields(1991, 3, 15)));
    }

    #[test]
    fn test_year_first() {
        assert_eq!(date("99/03/15", DateLayout::YearFirst), Ok(fields(1999, 3, 15)));
    }

    #[test]
    fn test_four_digit_lead_wins_over_hint() {
        for layout in [
            DateLayout::MonthFirst,
            DateLayout::DayFirst,
            DateLayout::YearFirst,
        ] {
            assert_eq!(date("2024-07-04", layout), Ok(fields(2024, 7, 4)));
            assert_eq!(date("2024/07/04", layout), Ok(fields(2024, 7, 4)));
        }
    }

    #[test]
    fn test_slash_preferred_over_dash() {
        // Splitting on '/' leaves "2024-07" as one non-numeric field
        assert_eq!(
            date("2024-07/04/05", DateLayout::MonthFirst),
            Err(ParseError::NonNumericField("2024-07".to_string()))
        );
    }

    #[test]
    fn test_field_count() {
        assert_eq!(
            date("03/15", DateLayout::MonthFirst),
            Err(ParseError::DateFieldCount(2))
        );
        assert_eq!(
            date("03/15/24/01", DateLayout::MonthFirst),
            Err(ParseError::DateFieldCount(4))
        );
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        assert_eq!(date("03//15/24", DateLayout::MonthFirst), Ok(fields(2024, 3, 15)));
    }

    #[test]
    fn test_non_numeric_third_field() {
        assert_eq!(
            date("03/15/2x", DateLayout::MonthFirst),
            Err(ParseError::NonNumericField("2x".to_string()))
        );
    }

    #[test]
    fn test_apply() {
        let mut dt = DateTime::default();
        fields(2005, 3, 15).apply(&mut dt);
        assert_eq!(dt.year, 2005);
        assert_eq!(dt.short_year, 5);
        assert_eq!(dt.month, 3);
        assert_eq!(dt.day, 15);
    }
}
