//! Positional parser for logplex syslog lines.
//!
//! ```text
//! <PRI>VERSION TIMESTAMP HOSTNAME SOURCE APPNAME[PID] - MESSAGE
//! ```
//!
//! Fields are scanned left to right. Whitespace may precede any token; once a
//! field has been consumed the scanner never backs up into it.

use crate::domain::model::ParsedMessage;
use crate::utils::error::{Field, ParseError};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// RFC 5424 caps PRI at facility 23, severity 7
const MAX_PRIORITY: u16 = 191;

#[derive(Debug, Clone, Copy, Default)]
pub struct MessageParser;

impl MessageParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, line: &str) -> Result<ParsedMessage, ParseError> {
        let mut scanner = Scanner::new(line);

        let priority = parse_priority(&mut scanner)?;

        scanner.skip_whitespace();
        let version = scanner.take_while(|b| b.is_ascii_digit());
        let version: u32 = version
            .parse()
            .map_err(|_| ParseError::Malformed {
                field: Field::Version,
            })?;

        let timestamp = scanner.token(|b| !is_whitespace(b), Field::Timestamp)?;
        let timestamp = parse_timestamp(timestamp).ok_or_else(|| ParseError::BadTimestamp {
            value: timestamp.to_string(),
        })?;

        let hostname = scanner.token(is_host_char, Field::Hostname)?;
        let source = scanner.token(is_host_char, Field::Source)?;
        let appname = parse_appname(&mut scanner)?;

        // 只去掉分隔用的一個空白,其餘保留原樣
        scanner.eat(b' ');
        let message = scanner.rest();

        Ok(ParsedMessage {
            priority,
            severity: priority & 0x07,
            facility: priority >> 3,
            version,
            timestamp,
            hostname: hostname.to_string(),
            source: source.to_string(),
            appname: appname.to_string(),
            message: message.to_string(),
        })
    }
}

fn parse_priority(scanner: &mut Scanner<'_>) -> Result<u8, ParseError> {
    scanner.skip_whitespace();
    if !scanner.eat(b'<') {
        return Err(ParseError::Malformed {
            field: Field::Priority,
        });
    }

    let digits = scanner.take_while(|b| b.is_ascii_digit());
    if !scanner.eat(b'>') {
        return Err(ParseError::Malformed {
            field: Field::Priority,
        });
    }

    match digits.parse::<u16>() {
        Ok(value) if value <= MAX_PRIORITY => Ok(value as u8),
        _ => Err(ParseError::BadPriority {
            value: digits.to_string(),
        }),
    }
}

/// Appname, an optional `[pid]` suffix that is dropped, then a mandatory `-`.
fn parse_appname<'a>(scanner: &mut Scanner<'a>) -> Result<&'a str, ParseError> {
    let appname = scanner.token(is_app_char, Field::Appname)?;
    let bad = |reason: &str| ParseError::BadAppname {
        value: appname.to_string(),
        reason: reason.to_string(),
    };

    let before_suffix = scanner.pos;
    scanner.skip_whitespace();
    if scanner.eat(b'[') {
        let pid = scanner.take_while(|b| b.is_ascii_digit());
        if pid.is_empty() {
            return Err(bad("process id suffix is not numeric"));
        }
        if !scanner.eat(b']') {
            return Err(bad("unterminated process id suffix"));
        }
    } else {
        scanner.pos = before_suffix;
    }

    scanner.skip_whitespace();
    if !scanner.eat(b'-') {
        return Err(bad("missing '-' separator before message"));
    }

    Ok(appname)
}

/// Offset forms after a trailing `Z` has been rewritten to `+00:00`.
/// Seconds and fractions are optional.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn parse_timestamp(token: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(token) {
        return Some(ts);
    }

    let normalized = match token.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{}+00:00", local),
        None => token.to_string(),
    };
    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
    {
        return Some(ts);
    }

    // no offset at all: read as UTC
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_host_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.')
}

fn is_app_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'(' | b')' | b'/' | b'-' | b'_' | b'.')
}

/// Byte cursor over the line. Every predicate matches ASCII only, so slice
/// boundaries always fall on char boundaries.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Whitespace, then a non-empty run of `pred` bytes.
    fn token(&mut self, pred: impl Fn(u8) -> bool, field: Field) -> Result<&'a str, ParseError> {
        self.skip_whitespace();
        let token = self.take_while(pred);
        if token.is_empty() {
            return Err(ParseError::Malformed { field });
        }
        Ok(token)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }
}
