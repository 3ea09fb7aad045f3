//! Structured JSON logger
//!
//! - One log line = one event
//! - Keys in alphabetical order, so output is deterministic
//! - Synchronous, no buffering
//! - TRACE..WARN to stdout, ERROR and FATAL to stderr
//! - Lines below the process-wide minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Routine call detail
    Trace = 0,
    /// Normal state changes
    Info = 1,
    /// Rejected calls the caller is expected to handle
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn uses_stderr(self) -> bool {
        self >= Severity::Error
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Trace as u8);

/// Logger writing one JSON object per line
pub struct Logger;

impl Logger {
    /// Drop every line below `severity`, process-wide.
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Current minimum severity.
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Check if a line at `severity` would be written.
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log an event with the given severity and fields.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        if severity.uses_stderr() {
            Self::write_to(severity, event, fields, &mut io::stderr());
        } else {
            Self::write_to(severity, event, fields, &mut io::stdout());
        }
    }

    /// Render and write one line. Write failures are dropped: logging must
    /// never fail the operation being logged.
    pub fn write_to<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        let line = Self::render(severity, event, fields);
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Render one log line, newline included.
    ///
    /// `event` and `severity` are reserved keys; caller fields with those
    /// names are overwritten.
    pub fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut object = Map::new();
        for (key, value) in fields {
            object.insert((*key).to_string(), Value::String((*value).to_string()));
        }
        object.insert("event".to_string(), Value::String(event.to_string()));
        object.insert("severity".to_string(), Value::String(severity.as_str().to_string()));

        let mut line = Value::Object(object).to_string();
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert!(Severity::Error.uses_stderr());
        assert!(!Severity::Warn.uses_stderr());
    }

    #[test]
    fn test_render_json() {
        let line = Logger::render(Severity::Warn, "STATEMENT_MISMATCH", &[("reason", "size")]);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "STATEMENT_MISMATCH");
        assert_eq!(parsed["severity"], "WARN");
        assert_eq!(parsed["reason"], "size");
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = Logger::render(Severity::Info, "E", &[("zebra", "1"), ("apple", "2")]);
        let b = Logger::render(Severity::Info, "E", &[("apple", "2"), ("zebra", "1")]);
        assert_eq!(a, b);
        assert!(a.find("apple").unwrap() < a.find("zebra").unwrap());
    }

    #[test]
    fn test_reserved_keys_win() {
        let line = Logger::render(Severity::Info, "REAL", &[("event", "fake")]);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "REAL");
    }

    #[test]
    fn test_escapes_and_single_line() {
        let line = Logger::render(Severity::Info, "E", &[("query", "SELECT \"a\"\nFROM t")]);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));

        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["query"], "SELECT \"a\"\nFROM t");
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("FATAL".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_u8_mapping() {
        for severity in [Severity::Trace, Severity::Info, Severity::Warn, Severity::Error, Severity::Fatal] {
            assert_eq!(Severity::from_u8(severity as u8), severity);
        }
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        Logger::write_to(Severity::Trace, "E", &[], &mut buffer);
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"severity\":\"TRACE\""));
    }
}
