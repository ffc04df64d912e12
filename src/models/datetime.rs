//! Broken-down calendar date/time and the date layout hint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A date and time of day split into calendar fields.
///
/// Both year forms are carried: `year` is the four-digit year and
/// `short_year` its last two digits. The parser derives whichever one the
/// input did not supply, and the validator checks that they agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTime {
    /// Month of year (1-12)
    pub month: u32,

    /// Day of month (1-31)
    pub day: u32,

    /// Two-digit year (0-99)
    pub short_year: u32,

    /// Four-digit year
    pub year: u32,

    /// Hour (0-24, 24 only as 24:00:00)
    pub hour: u32,

    /// Minute (0-59)
    pub minute: u32,

    /// Second (0-59)
    pub second: u32,

    /// Millisecond (0-999), parsed but never used in duration math
    pub millisecond: u32,

    /// Daylight-saving indicator, carried but never applied
    pub dst: bool,
}

impl DateTime {
    /// Build a value from a four-digit year and time fields.
    pub fn from_ymd_hms(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            month,
            day,
            short_year: year % 100,
            year,
            hour,
            minute,
            second,
            ..Self::default()
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}",
            self.month, self.day, self.year, self.hour, self.minute, self.second
        )
    }
}

/// Field order to assume for delimited dates.
///
/// A delimited date whose first field has four digits is always read as
/// year-month-day, whatever the hint says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DateLayout {
    /// Undelimited `YYMMDD` / `YYYYMMDD` (record timestamps)
    #[default]
    Compact,
    /// `MM/DD/YY[YY]`
    MonthFirst,
    /// `DD/MM/YY[YY]`
    DayFirst,
    /// `YY[YY]/MM/DD`
    YearFirst,
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLayout::Compact => write!(f, "compact"),
            DateLayout::MonthFirst => write!(f, "month-first"),
            DateLayout::DayFirst => write!(f, "day-first"),
            DateLayout::YearFirst => write!(f, "year-first"),
        }
    }
}

impl FromStr for DateLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(DateLayout::Compact),
            "month-first" | "us" | "mdy" => Ok(DateLayout::MonthFirst),
            "day-first" | "eu" | "dmy" => Ok(DateLayout::DayFirst),
            "year-first" | "iso" | "ymd" => Ok(DateLayout::YearFirst),
            other => Err(format!(
                "unknown date layout '{}' (expected compact, month-first, day-first or year-first)",
                other
            )),
        }
    }
}
