//! Rendering of [`LogEntry`] values into single output lines.

use crate::entry::{LogEntry, Metadata};
use crate::error::{LoggerError, LoggerErrorExt};
use crate::level::Level;
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Write as _};

/// Turns an entry into one line of output, without the trailing newline.
pub trait Formatter: fmt::Debug + Send + Sync {
    /// # Errors
    /// Returns an error if the entry cannot be rendered.
    fn format(&self, entry: &LogEntry) -> Result<String, LoggerError>;
}

/// `[LEVEL] [LAYER] [timestamp] message key=value ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter;

/// One JSON object per line with `level`, `layer`, `message`, `timestamp`
/// and, when present, `metadata`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

fn timestamp(entry: &LogEntry) -> String {
    entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Formatter for PlainTextFormatter {
    fn format(&self, entry: &LogEntry) -> Result<String, LoggerError> {
        let mut line = String::with_capacity(64 + entry.message.len());
        let (level, layer, message) = (entry.level, &entry.layer, &entry.message);
        write!(line, "[{level}] [{layer}] [{}] {message}", timestamp(entry))?;

        for (key, value) in entry.metadata.iter() {
            match value {
                Value::String(s) => write!(line, " {key}={s}")?,
                other => write!(line, " {key}={other}")?,
            }
        }

        Ok(line)
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    level: Level,
    layer: &'a str,
    message: &'a str,
    timestamp: String,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    metadata: &'a Metadata,
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry) -> Result<String, LoggerError> {
        let line = JsonLine {
            level: entry.level,
            layer: entry.layer.as_str(),
            message: &entry.message,
            timestamp: timestamp(entry),
            metadata: &entry.metadata,
        };
        serde_json::to_string(&line).context("Encoding log entry as JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use strata_engine::Layer;

    fn entry() -> LogEntry {
        LogEntry {
            level: Level::Info,
            layer: Layer::HTTP,
            message: "Request started".to_owned(),
            timestamp: Utc.with_ymd_and_hms(2025, 9, 29, 12, 0, 0).unwrap(),
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn test_plain_text_without_metadata() {
        let line = PlainTextFormatter.format(&entry()).unwrap();
        assert_eq!(line, "[INFO] [HTTP] [2025-09-29T12:00:00Z] Request started");
    }

    #[test]
    fn test_plain_text_with_metadata() {
        let entry = entry()
            .with_metadata(Metadata::new().with("userID", 123).with("session", "abc"));
        let line = PlainTextFormatter.format(&entry).unwrap();
        assert_eq!(
            line,
            "[INFO] [HTTP] [2025-09-29T12:00:00Z] Request started session=abc userID=123"
        );
    }

    #[test]
    fn test_json_omits_empty_metadata() {
        let line = JsonFormatter.format(&entry()).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["level"], "INFO");
        assert_eq!(value["layer"], "HTTP");
        assert_eq!(value["message"], "Request started");
        assert_eq!(value["timestamp"], "2025-09-29T12:00:00Z");
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_json_includes_metadata() {
        let entry = entry().with_metadata(Metadata::new().with("userID", 123));
        let line = JsonFormatter.format(&entry).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["metadata"]["userID"], 123);
        assert!(value["metadata"].get("data").is_none());
        assert!(!line.contains('\n'));
    }
}
