use crate::errors::JobBoardError;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only JSONL event log. The board owns the terminal while it runs,
/// so diagnostics go to a file instead of stdout.
#[derive(Debug, Clone)]
pub struct JsonlLogger {
    pub path: PathBuf,
    pub max_payload_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent<'a> {
    pub level: &'a str,
    pub event_type: &'a str,
    pub payload: Value,
}

impl JsonlLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_payload_bytes: 4096,
        }
    }

    pub fn append(&self, event: &LogEvent<'_>) -> Result<(), JobBoardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| JobBoardError::Io(e.to_string()))?;
        }
        let truncated = truncate_json(event.payload.clone(), self.max_payload_bytes);
        let line = serde_json::to_string(&LogEvent {
            level: event.level,
            event_type: event.event_type,
            payload: truncated,
        })
        .map_err(|e| JobBoardError::Io(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| JobBoardError::Io(e.to_string()))?;
        file.write_all(line.as_bytes())
            .map_err(|e| JobBoardError::Io(e.to_string()))?;
        file.write_all(b"\n")
            .map_err(|e| JobBoardError::Io(e.to_string()))
    }
}

fn truncate_json(value: Value, max_bytes: usize) -> Value {
    let rendered = serde_json::to_string(&value).unwrap_or_default();
    if rendered.len() <= max_bytes {
        return value;
    }
    let mut truncated = rendered;
    // Job names are arbitrary strings; the cut point must land on a char
    // boundary or String::truncate panics.
    let mut cut = max_bytes.saturating_sub(3).min(truncated.len());
    while !truncated.is_char_boundary(cut) {
        cut -= 1;
    }
    truncated.truncate(cut);
    Value::String(format!("{truncated}..."))
}

#[cfg(test)]
mod tests {
    use super::{JsonlLogger, LogEvent};
    use serde_json::json;

    #[test]
    fn logger_appends_jsonl_and_truncates_large_payloads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("board.jsonl");
        let mut logger = JsonlLogger::new(&path);
        logger.max_payload_bytes = 24;

        logger
            .append(&LogEvent {
                level: "info",
                event_type: "job_state",
                payload: json!({"job": "build", "state": "done"}),
            })
            .expect("append");
        logger
            .append(&LogEvent {
                level: "info",
                event_type: "job_state",
                payload: json!({"job": "a-very-long-job-name-indeed", "state": "active"}),
            })
            .expect("append");

        let text = std::fs::read_to_string(&path).expect("read");
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"event_type\":\"job_state\""));
        assert!(lines[1].contains("..."));
    }

    #[test]
    fn truncation_backs_off_to_a_char_boundary() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("board.jsonl");
        let mut logger = JsonlLogger::new(&path);
        logger.max_payload_bytes = 10;

        // Multi-byte characters straddling the cut point must not panic.
        logger
            .append(&LogEvent {
                level: "info",
                event_type: "job_state",
                payload: json!("xééééé"),
            })
            .expect("append");

        let text = std::fs::read_to_string(&path).expect("read");
        assert!(text.contains("..."));
    }
}
