//! Input sources.
//!
//! A source is a named file or standard input. Lines come back with
//! trailing whitespace removed; invalid UTF-8 is replaced rather than
//! treated as a read error.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

/// Errors opening or reading a source.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error in {name} at line {line}: {source}")]
    Read {
        name: String,
        line: u64,
        #[source]
        source: io::Error,
    },
}

/// Where lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means standard input, anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Sources for a list of command-line arguments; none means stdin.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Vec<Self> {
        if args.is_empty() {
            return vec![InputSource::Stdin];
        }
        args.iter().map(|a| Self::from_arg(a.as_ref())).collect()
    }

    /// Open the source for line reading.
    pub fn open(&self) -> Result<LineReader<Box<dyn BufRead>>, InputError> {
        let reader: Box<dyn BufRead> = match self {
            InputSource::Stdin => Box::new(BufReader::new(io::stdin())),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|source| InputError::Open {
                    path: path.clone(),
                    source,
                })?;
                Box::new(BufReader::new(file))
            }
        };

        debug!("Opened input {}", self);
        Ok(LineReader::new(self.to_string(), reader))
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A line read from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number within its source
    pub number: u64,
    pub text: String,
}

/// Iterator over the lines of one source.
pub struct LineReader<R> {
    name: String,
    reader: R,
    line_num: u64,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            line_num: 0,
            buf: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<InputLine, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None, // EOF
            Ok(_) => {
                self.line_num += 1;
                let text = String::from_utf8_lossy(&self.buf).trim_end().to_string();
                Some(Ok(InputLine {
                    number: self.line_num,
                    text,
                }))
            }
            Err(source) => Some(Err(InputError::Read {
                name: self.name.clone(),
                line: self.line_num + 1,
                source,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn lines(input: &[u8]) -> Vec<InputLine> {
        LineReader::new("test", Cursor::new(input.to_vec()))
            .map(|l| l.unwrap())
            .collect()
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        let read = lines(b"first  \t\r\nsecond\n");
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].text, "first");
        assert_eq!(read[0].number, 1);
        assert_eq!(read[1].text, "second");
        assert_eq!(read[1].number, 2);
    }

    #[test]
    fn test_last_line_without_newline() {
        let read = lines(b"a\nb");
        assert_eq!(read.len(), 2);
        assert_eq!(read[1].text, "b");
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let read = lines(b"a\n\n   \nb\n");
        assert_eq!(read.len(), 4);
        assert_eq!(read[1].text, "");
        assert_eq!(read[2].text, "");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let read = lines(b"ok\xff\n");
        assert_eq!(read[0].text, "ok\u{fffd}");
    }

    #[test]
    fn test_leading_whitespace_kept() {
        let read = lines(b"  indented\n");
        assert_eq!(read[0].text, "  indented");
    }

    #[test]
    fn test_from_args() {
        assert_eq!(InputSource::from_args::<&str>(&[]), vec![InputSource::Stdin]);
        assert_eq!(
            InputSource::from_args(&["-", "runs.log"]),
            vec![
                InputSource::Stdin,
                InputSource::File(PathBuf::from("runs.log"))
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(InputSource::Stdin.to_string(), "<stdin>");
        assert_eq!(
            InputSource::File(PathBuf::from("a/b.log")).to_string(),
            "a/b.log"
        );
    }

    #[test]
    fn test_open_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("runs.log");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let source = InputSource::File(path);
        let reader = source.open().unwrap();
        let read: Vec<_> = reader.map(|l| l.unwrap().text).collect();
        assert_eq!(read, vec!["one", "two"]);
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = InputSource::File(temp_dir.path().join("missing.log"));

        assert!(matches!(source.open(), Err(InputError::Open { .. })));
    }
}
