//! Report rendering.
//!
//! Three output shapes for [`AggregateStats`]:
//! - plain text, more detail with verbosity
//! - CSV, one row per input source with an optional header
//! - JSON, the finalized statistics as-is

use std::io::Write;

use thiserror::Error;

use crate::models::AggregateStats;

/// Errors writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

pub const CSV_COLUMNS: [&str; 8] = [
    "Entry",
    "Total Records",
    "Selected Records",
    "Bypassed Records",
    "Total Run Time",
    "Minimum Run Time",
    "Maximum Run Time",
    "Average Run Time",
];

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Render seconds as `{days}d HH:MM:SS`.
pub fn format_elapsed(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs() as i64;

    let days = seconds / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    format!("{}{}d {:02}:{:02}:{:02}", sign, days, hours, minutes, secs)
}

fn seconds_line<W: Write>(out: &mut W, title: &str, seconds: i64) -> std::io::Result<()> {
    writeln!(out, "{:<20}: {:>11} =~ {}", title, seconds, format_elapsed(seconds))
}

/// Plain-text summary. Counts, total, min and max need `verbose > 0`;
/// the average is always written.
pub fn write_text<W: Write>(
    out: &mut W,
    stats: &AggregateStats,
    verbose: u8,
) -> Result<(), ReportError> {
    if verbose > 0 {
        writeln!(out, "{:<20}: {}", "Total Records", stats.total_records)?;
        writeln!(out, "{:<20}: {}", "Selected Records", stats.selected_records)?;
        if stats.total_records != stats.selected_records {
            writeln!(out, "{:<20}: {}", "Bypassed Records", stats.bypassed_records())?;
        }
        seconds_line(out, "Total Seconds", stats.total_seconds)?;
        seconds_line(out, "Minimum Seconds", stats.minimum_seconds.unwrap_or(0))?;
        seconds_line(out, "Maximum Seconds", stats.maximum_seconds.unwrap_or(0))?;
    }
    seconds_line(out, "Average Seconds", stats.average_seconds.unwrap_or(0))?;
    Ok(())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// CSV column titles.
pub fn write_csv_header<W: Write>(out: &mut W) -> Result<(), ReportError> {
    let header: Vec<String> = CSV_COLUMNS.iter().map(|c| quote(c)).collect();
    writeln!(out, "{}", header.join(","))?;
    Ok(())
}

/// One CSV data row.
pub fn write_csv_row<W: Write>(out: &mut W, stats: &AggregateStats) -> Result<(), ReportError> {
    writeln!(
        out,
        "{},{},{},{},{},{},{},{}",
        quote(stats.label.as_deref().unwrap_or_default()),
        stats.total_records,
        stats.selected_records,
        stats.bypassed_records(),
        quote(&format_elapsed(stats.total_seconds)),
        quote(&format_elapsed(stats.minimum_seconds.unwrap_or(0))),
        quote(&format_elapsed(stats.maximum_seconds.unwrap_or(0))),
        quote(&format_elapsed(stats.average_seconds.unwrap_or(0))),
    )?;
    Ok(())
}

/// Pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, stats: &AggregateStats) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, stats)?;
    writeln!(out)?;
    Ok(())
}

/// What to render and how.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub format: ReportFormat,
    /// CSV header line
    pub title: bool,
    pub verbose: u8,
}

/// Render a run: `rows` are the per-source CSV snapshots, `totals` the
/// finalized statistics used by the text and JSON shapes.
pub fn write_report<W: Write>(
    out: &mut W,
    options: &ReportOptions,
    rows: &[AggregateStats],
    totals: &AggregateStats,
) -> Result<(), ReportError> {
    match options.format {
        ReportFormat::Text => write_text(out, totals, options.verbose)?,
        ReportFormat::Csv => {
            if options.title {
                write_csv_header(out)?;
            }
            for row in rows {
                write_csv_row(out, row)?;
            }
        }
        ReportFormat::Json => write_json(out, totals)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), ReportError>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_stats() -> AggregateStats {
        AggregateStats {
            total_records: 3,
            selected_records: 2,
            total_seconds: 93_600,
            minimum_seconds: Some(3600),
            maximum_seconds: Some(90_000),
            average_seconds: Some(46_800),
            label: Some("JOBA".to_string()),
        }
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(90_000), "1d 01:00:00");
        assert_eq!(format_elapsed(0), "0d 00:00:00");
        assert_eq!(format_elapsed(3600), "0d 01:00:00");
        assert_eq!(format_elapsed(59), "0d 00:00:59");
        assert_eq!(format_elapsed(86_399), "0d 23:59:59");
        assert_eq!(format_elapsed(12 * 86_400 + 3723), "12d 01:02:03");
    }

    #[test]
    fn test_text_verbose() {
        let text = render(|out| write_text(out, &sample_stats(), 1));
        let expected = "\
Total Records       : 3
Selected Records    : 2
Bypassed Records    : 1
Total Seconds       :       93600 =~ 1d 02:00:00
Minimum Seconds     :        3600 =~ 0d 01:00:00
Maximum Seconds     :       90000 =~ 1d 01:00:00
Average Seconds     :       46800 =~ 0d 13:00:00
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_text_quiet_shows_only_average() {
        let text = render(|out| write_text(out, &sample_stats(), 0));
        assert_eq!(text, "Average Seconds     :       46800 =~ 0d 13:00:00\n");
    }

    #[test]
    fn test_text_omits_bypassed_when_none() {
        let mut stats = sample_stats();
        stats.total_records = 2;
        let text = render(|out| write_text(out, &stats, 1));
        assert!(!text.contains("Bypassed"));
    }

    #[test]
    fn test_text_empty_selection() {
        let stats = AggregateStats {
            total_records: 4,
            ..Default::default()
        };
        let text = render(|out| write_text(out, &stats, 1));
        assert!(text.contains("Selected Records    : 0"));
        assert!(text.contains("Minimum Seconds     :           0 =~ 0d 00:00:00"));
        assert!(text.ends_with("Average Seconds     :           0 =~ 0d 00:00:00\n"));
    }

    #[test]
    fn test_csv_header() {
        let text = render(|out| write_csv_header(out));
        assert_eq!(
            text,
            "\"Entry\",\"Total Records\",\"Selected Records\",\"Bypassed Records\",\"Total Run Time\",\"Minimum Run Time\",\"Maximum Run Time\",\"Average Run Time\"\n"
        );
    }

    #[test]
    fn test_csv_row() {
        let text = render(|out| write_csv_row(out, &sample_stats()));
        assert_eq!(
            text,
            "\"JOBA\",3,2,1,\"1d 02:00:00\",\"0d 01:00:00\",\"1d 01:00:00\",\"0d 13:00:00\"\n"
        );
    }

    #[test]
    fn test_csv_escapes_quotes() {
        let mut stats = sample_stats();
        stats.label = Some("say \"hi\"".to_string());
        let text = render(|out| write_csv_row(out, &stats));
        assert!(text.starts_with("\"say \"\"hi\"\"\",3,"));
    }

    #[test]
    fn test_report_csv_rows_with_title() {
        let options = ReportOptions {
            format: ReportFormat::Csv,
            title: true,
            verbose: 0,
        };
        let rows = vec![sample_stats(), sample_stats()];
        let text = render(|out| write_report(out, &options, &rows, &sample_stats()));
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("\"Entry\""));
    }

    #[test]
    fn test_report_json() {
        let options = ReportOptions {
            format: ReportFormat::Json,
            ..Default::default()
        };
        let text = render(|out| write_report(out, &options, &[], &sample_stats()));
        let parsed: AggregateStats = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample_stats());
    }
}
