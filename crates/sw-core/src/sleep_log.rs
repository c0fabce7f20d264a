//! Sleep log parsing.
//!
//! A sleep log is a text file with one session per line, in the format
//! produced by `date(1)`:
//!
//! ```text
//! # comment lines are ignored
//! sleep Tue Jan 02 23:30:00 2024 - Wed Jan 03 06:30:00 2024
//! sleep Mon Jan  1 23:00:00 2024 - Tue Jan  2 06:00:00 2024
//! ```
//!
//! Lines that do not match are skipped with a warning; they never abort reading.

use std::io::BufRead;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;

use crate::types::{TimeSpan, ValidationError};

/// Pre-compiled regex for session lines. Each timestamp is exactly 20 characters.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^sleep\s+\w{3}\s+([\d\w\s:]{20})\s+-\s+\w{3}\s+([\d\w\s:]{20})").unwrap()
});

/// Timestamp format after whitespace has been collapsed.
const TIME_FORMAT: &str = "%b %d %H:%M:%S %Y";

/// Marks a line as a comment.
const COMMENT_MARKER: char = '#';

/// Errors reading a sleep log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The underlying reader failed.
    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Why a line was not accepted as a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLine {
    /// The line does not look like a session at all.
    #[error("pattern didn't match")]
    NoMatch,

    /// One of the timestamps could not be parsed.
    #[error("invalid timestamp {0:?}")]
    Timestamp(String),

    /// The session ends before it starts.
    #[error(transparent)]
    Reversed(#[from] ValidationError),
}

/// Classification of a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Span(TimeSpan),
    Comment,
    Blank,
    Malformed(MalformedLine),
}

/// Result of reading a whole log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SleepLog {
    /// Sessions in file order.
    pub spans: Vec<TimeSpan>,
    /// Lines skipped because they could not be parsed.
    pub malformed: usize,
    /// Comment lines skipped.
    pub comments: usize,
}

/// Classifies one line of a sleep log.
pub fn parse_line(line: &str) -> LogLine {
    if line.trim().is_empty() {
        return LogLine::Blank;
    }
    if line.starts_with(COMMENT_MARKER) {
        return LogLine::Comment;
    }
    let Some(caps) = LINE_RE.captures(line) else {
        return LogLine::Malformed(MalformedLine::NoMatch);
    };

    let (from, to) = match (parse_timestamp(&caps[1]), parse_timestamp(&caps[2])) {
        (Ok(from), Ok(to)) => (from, to),
        (Err(err), _) | (_, Err(err)) => return LogLine::Malformed(err),
    };

    TimeSpan::new(from, to).map_or_else(|err| LogLine::Malformed(err.into()), LogLine::Span)
}

/// Parses a `date(1)` style timestamp such as `Jan  1 23:00:00 2024`.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, MalformedLine> {
    // date(1) pads single-digit days with a space
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&collapsed, TIME_FORMAT)
        .map_err(|_| MalformedLine::Timestamp(raw.trim().to_string()))
}

/// Reads every session from a sleep log.
///
/// Malformed lines are counted and logged, comments and blank lines are
/// skipped silently. Bytes that are not valid UTF-8 are replaced before a line
/// is classified, so they never abort reading. Only I/O failures are errors;
/// an empty result is left to the caller to judge.
pub fn read_log<R: BufRead>(mut reader: R) -> Result<SleepLog, LogError> {
    let mut log = SleepLog::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        line_number += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LogError::Read {
                line: line_number,
                source,
            })?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        match parse_line(line.trim_end_matches(['\n', '\r'])) {
            LogLine::Span(span) => log.spans.push(span),
            LogLine::Comment => log.comments += 1,
            LogLine::Blank => {}
            LogLine::Malformed(reason) => {
                tracing::warn!(line = line_number, %reason, "skipping malformed line, typo?");
                log.malformed += 1;
            }
        }
    }

    tracing::debug!(
        spans = log.spans.len(),
        malformed = log.malformed,
        comments = log.comments,
        "read sleep log"
    );
    Ok(log)
}
